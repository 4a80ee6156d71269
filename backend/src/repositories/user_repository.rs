//! Database repository for user management operations.
//!
//! Provides CRUD operations for registered users.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, email_address, password_hash, first_name, last_name, \
     age, height_feet, height_inches, weight, gender, experience_level, bio, \
     is_trainer, cost, city, profile_picture_url, created_at, updated_at";

/// Narrow persistence contract for user records.
///
/// The auth service is written against this trait so it can be exercised
/// with an in-memory store in tests, without a real database.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by email address (the login key).
    async fn find_by_email(&self, email_address: &str) -> Result<Option<User>>;

    /// Looks up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Looks up a user by their store-assigned id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Inserts a new user and returns the row with its assigned id.
    async fn create(&self, user: CreateUser) -> Result<User>;

    /// Persists field changes on an existing user and returns the row.
    async fn save(&self, user: &User) -> Result<User>;
}

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity against SQLite.
pub struct SqliteUserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool handle
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_by_column(&self, query: &str, value: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for SqliteUserRepository {
    async fn find_by_email(&self, email_address: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email_address = ?");
        self.find_by_column(&query, email_address).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        self.find_by_column(&query, username).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (username, email_address, password_hash, first_name, last_name, \
             age, height_feet, height_inches, weight, gender, experience_level, bio, \
             is_trainer, cost, city, profile_picture_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(user.username)
            .bind(user.email_address)
            .bind(user.password_hash)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.age)
            .bind(user.height_feet)
            .bind(user.height_inches)
            .bind(user.weight)
            .bind(user.gender)
            .bind(user.experience_level)
            .bind(user.bio)
            .bind(user.is_trainer)
            .bind(user.cost)
            .bind(user.city)
            .bind(user.profile_picture_url)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User> {
        let query = format!(
            "UPDATE users SET username = ?, email_address = ?, password_hash = ?, \
             first_name = ?, last_name = ?, age = ?, height_feet = ?, height_inches = ?, \
             weight = ?, gender = ?, experience_level = ?, bio = ?, is_trainer = ?, \
             cost = ?, city = ?, profile_picture_url = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.email_address)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.age)
            .bind(user.height_feet)
            .bind(user.height_inches)
            .bind(user.weight)
            .bind(&user.gender)
            .bind(&user.experience_level)
            .bind(&user.bio)
            .bind(user.is_trainer)
            .bind(user.cost)
            .bind(&user.city)
            .bind(&user.profile_picture_url)
            .bind(Utc::now())
            .bind(user.id)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::database::models::{ExperienceLevel, Gender};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_repo() -> SqliteUserRepository {
        // A pool larger than one connection would hand out separate
        // in-memory databases.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let db = Database { pool: pool.clone() };
        db.migrate().await.unwrap();

        SqliteUserRepository::new(pool)
    }

    fn create_user(username: &str, email_address: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email_address: email_address.to_string(),
            password_hash: "$2b$12$fake.digest.for.tests".to_string(),
            first_name: "Jeton".to_string(),
            last_name: "Cesaj".to_string(),
            age: 23,
            height_feet: 6,
            height_inches: 1,
            weight: 190.0,
            gender: Some(Gender::Male),
            experience_level: Some(ExperienceLevel::Advanced),
            bio: None,
            is_trainer: true,
            cost: 50.0,
            city: Some("Grand Rapids".to_string()),
            profile_picture_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_in_order() {
        let repo = test_repo().await;

        let first = repo
            .create(create_user("jeton", "jeb64@calvin.edu"))
            .await
            .unwrap();
        let second = repo
            .create(create_user("alim", "aad32@calvin.edu"))
            .await
            .unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.username, "jeton");
        assert_eq!(first.profile_picture_url, None);
    }

    #[tokio::test]
    async fn test_lookups_round_trip() {
        let repo = test_repo().await;
        let created = repo
            .create(create_user("jeton", "jeb64@calvin.edu"))
            .await
            .unwrap();

        let by_email = repo
            .find_by_email("jeb64@calvin.edu")
            .await
            .unwrap()
            .unwrap();
        let by_username = repo.find_by_username("jeton").await.unwrap().unwrap();
        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(by_email.id, created.id);
        assert_eq!(by_username.id, created.id);
        assert_eq!(by_id.email_address, "jeb64@calvin.edu");
        assert_eq!(by_id.gender, Some(Gender::Male));
        assert_eq!(by_id.experience_level, Some(ExperienceLevel::Advanced));

        assert!(
            repo.find_by_email("nobody@calvin.edu")
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.find_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_indexes_reject_duplicates() {
        let repo = test_repo().await;
        repo.create(create_user("jeton", "jeb64@calvin.edu"))
            .await
            .unwrap();

        // Same email, different username.
        assert!(
            repo.create(create_user("other", "jeb64@calvin.edu"))
                .await
                .is_err()
        );
        // Same username, different email.
        assert!(
            repo.create(create_user("jeton", "other@calvin.edu"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_save_persists_profile_picture_url() {
        let repo = test_repo().await;
        let mut user = repo
            .create(create_user("jeton", "jeb64@calvin.edu"))
            .await
            .unwrap();

        user.profile_picture_url =
            Some("http://localhost:3000/uploads/1-1700000000000-selfie.png".to_string());
        let saved = repo.save(&user).await.unwrap();

        assert_eq!(saved.profile_picture_url, user.profile_picture_url);

        let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.profile_picture_url, user.profile_picture_url);
    }
}

//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user, keyed by a store-assigned immutable id.
///
/// The password hash is write-only: it never appears in a serialized
/// response, only in the row itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email_address: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub height_feet: i64,
    pub height_inches: i64,
    pub weight: f64,
    pub gender: Option<Gender>,
    pub experience_level: Option<ExperienceLevel>,
    pub bio: Option<String>,
    pub is_trainer: bool,
    pub cost: f64,
    pub city: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertion DTO for the users table. The password arrives here already
/// hashed; plaintext never reaches the repository layer.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email_address: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub height_feet: i64,
    pub height_inches: i64,
    pub weight: f64,
    pub gender: Option<Gender>,
    pub experience_level: Option<ExperienceLevel>,
    pub bio: Option<String>,
    pub is_trainer: bool,
    pub cost: f64,
    pub city: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "TEXT")] // Store as TEXT in SQLite
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "TEXT")] // Store as TEXT in SQLite
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Beginner => write!(f, "Beginner"),
            ExperienceLevel::Intermediate => write!(f, "Intermediate"),
            ExperienceLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(ExperienceLevel::Beginner),
            "Intermediate" => Ok(ExperienceLevel::Intermediate),
            "Advanced" => Ok(ExperienceLevel::Advanced),
            _ => Err(format!("Invalid experience level: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "loya".to_string(),
            email_address: "zn23@calvin.edu".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            first_name: "Loya".to_string(),
            last_name: "Smith".to_string(),
            age: 25,
            height_feet: 5,
            height_inches: 8,
            weight: 170.0,
            gender: Some(Gender::Male),
            experience_level: Some(ExperienceLevel::Intermediate),
            bio: Some("Enjoys lifting weights and doing HIIT workouts.".to_string()),
            is_trainer: false,
            cost: 0.0,
            city: Some("New York".to_string()),
            profile_picture_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("$2b$12$"));
        assert!(json.contains("\"emailAddress\":\"zn23@calvin.edu\""));
    }

    #[test]
    fn test_enum_round_trip() {
        use std::str::FromStr;

        assert_eq!(Gender::from_str("Female").unwrap(), Gender::Female);
        assert_eq!(Gender::Female.to_string(), "Female");
        assert!(Gender::from_str("female").is_err());

        assert_eq!(
            ExperienceLevel::from_str("Advanced").unwrap(),
            ExperienceLevel::Advanced
        );
        assert_eq!(ExperienceLevel::Beginner.to_string(), "Beginner");
    }
}

//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::config::Config;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::services::blob_storage::BlobStore;
use crate::utils::jwt::{TokenIssuer, TokenKind};
use crate::utils::password;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

/// Authentication service orchestrating credential checks, token issuance,
/// and profile asset binding.
///
/// Written against the `UserStore` and `BlobStore` contracts so it can run
/// against in-memory fakes in tests.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    blobs: Arc<dyn BlobStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: Arc<dyn UserStore>, blobs: Arc<dyn BlobStore>, config: &Config) -> Self {
        AuthService {
            users,
            blobs,
            tokens: TokenIssuer::new(config),
        }
    }

    /// Registers a new identity and returns its first token pair.
    ///
    /// Duplicate email and username are checked here before the insert; the
    /// store's unique indexes cover the race against concurrent inserts.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_request(&request)?;

        if self
            .users
            .find_by_email(&request.email_address)
            .await?
            .is_some()
        {
            return Err(ServiceError::EmailInUse);
        }

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::UsernameInUse);
        }

        let password_hash = password::hash_password(&request.password)?;

        let user = self
            .users
            .create(CreateUser {
                username: request.username,
                email_address: request.email_address,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                age: request.age,
                height_feet: request.height_feet,
                height_inches: request.height_inches,
                weight: request.weight,
                gender: request.gender,
                experience_level: request.experience_level,
                bio: request.bio,
                is_trainer: request.is_trainer,
                cost: request.cost,
                city: request.city,
                profile_picture_url: None,
            })
            .await?;

        self.token_pair_response(user.id, user.username, user.email_address)
    }

    /// Authenticates an identity by email and password and mints a token pair.
    ///
    /// "No such user" and "wrong password" collapse into the same error so
    /// responses cannot be used to enumerate accounts.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        validate_request(&request)?;

        let user = match self.users.find_by_email(&request.email_address).await? {
            Some(user) => user,
            None => {
                tracing::debug!("login attempt for unknown email address");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        self.token_pair_response(user.id, user.username, user.email_address)
    }

    /// Exchanges a live refresh token for a fresh token pair.
    ///
    /// The presented refresh token stays valid until its own expiry; there
    /// is no server-side denylist.
    pub async fn refresh_token(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        validate_request(&request)?;

        let claims = self
            .tokens
            .verify(TokenKind::Refresh, &request.refresh_token)?;

        // The account may have been removed after the token was issued.
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", claims.sub.to_string()))?;

        self.token_pair_response(user.id, user.username, user.email_address)
    }

    /// Stores an uploaded profile picture and binds its URL to the identity.
    ///
    /// The blob is written before the identity lookup; an unknown id leaves
    /// an orphaned blob behind rather than failing the upload early.
    pub async fn bind_profile_picture(
        &self,
        id: i64,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> ServiceResult<UploadProfilePictureResponse> {
        let blob_name = format!(
            "{}-{}-{}",
            id,
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );

        let profile_picture_url = self
            .blobs
            .store(&blob_name, bytes, content_type)
            .await
            .map_err(|e| ServiceError::storage(e.to_string()))?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;

        user.profile_picture_url = Some(profile_picture_url.clone());
        self.users.save(&user).await?;

        Ok(UploadProfilePictureResponse {
            message: "Profile picture uploaded successfully.".to_string(),
            profile_picture_url,
        })
    }

    fn token_pair_response(
        &self,
        id: i64,
        username: String,
        email_address: String,
    ) -> ServiceResult<AuthResponse> {
        let access_token = self.tokens.mint(TokenKind::Access, id)?;
        let refresh_token = self.tokens.mint(TokenKind::Refresh, id)?;

        Ok(AuthResponse {
            id,
            username,
            email_address,
            access_token,
            refresh_token,
        })
    }
}

/// Formats validator failures into a single service error.
fn validate_request(request: &impl Validate) -> ServiceResult<()> {
    if let Err(validation_errors) = request.validate() {
        let error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        return Err(ServiceError::validation(error_messages.join(", ")));
    }
    Ok(())
}

/// Keeps blob names filesystem- and URL-safe whatever the uploaded file was
/// called.
fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

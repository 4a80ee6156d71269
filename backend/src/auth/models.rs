//! Data structures for authentication-related entities.
//!
//! This module defines the request and response payloads for login,
//! registration, token refresh, and profile picture upload. Wire field
//! names are camelCase to match the public API.

use crate::database::models::{ExperienceLevel, Gender};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email address is required"))]
    pub email_address: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request payload.
///
/// Profile attributes beyond the credential fields are opaque payload:
/// checked for presence and type, not interpreted.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email_address: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    pub age: i64,
    pub height_feet: i64,
    pub height_inches: i64,
    pub weight: f64,
    pub gender: Option<Gender>,
    pub experience_level: Option<ExperienceLevel>,
    pub bio: Option<String>,
    #[serde(default)]
    pub is_trainer: bool,
    #[serde(default)]
    pub cost: f64,
    pub city: Option<String>,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Response returned by login, register, and refresh: the identity's public
/// coordinates plus a fresh token pair. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub email_address: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response after a successful profile picture upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProfilePictureResponse {
    pub message: String,
    pub profile_picture_url: String,
}

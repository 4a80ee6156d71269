//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use thiserror::Error;

/// Generic service error used across the authentication subsystem.
///
/// Every variant maps to a single HTTP status and a user-safe message in
/// `api::common::service_error_to_http`; internal causes stay in the logs.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Covers both "no such user" and "wrong password" so callers cannot
    /// enumerate accounts; the internal cause is only logged.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("email address is already in use")]
    EmailInUse,

    #[error("username is already in use")]
    UsernameInUse,

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Token signature is invalid")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },

    #[error("Blob storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secrets, and blob storage
//! locations. The struct is built once at startup and passed into handlers
//! through an axum `Extension`; nothing reads the environment after boot.

use anyhow::{Context, Result, bail};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Signing secret for access tokens.
    pub jwt_secret: String,
    /// Signing secret for refresh tokens. Must differ from `jwt_secret` so
    /// one token kind can never be replayed as the other.
    pub jwt_refresh_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub jwt_refresh_expires_in_seconds: u64,
    pub server_port: u16,
    pub blob_storage_dir: String,
    pub blob_public_base_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_refresh_secret =
            env::var("JWT_REFRESH_SECRET").context("JWT_REFRESH_SECRET not set")?;

        if jwt_secret == jwt_refresh_secret {
            bail!("JWT_SECRET and JWT_REFRESH_SECRET must be distinct");
        }

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let jwt_refresh_expires_in_seconds = env::var("JWT_REFRESH_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse::<u64>()
            .context("JWT_REFRESH_EXPIRES_IN_SECONDS must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let blob_storage_dir =
            env::var("BLOB_STORAGE_DIR").unwrap_or_else(|_| "./uploads".to_string());

        let blob_public_base_url = env::var("BLOB_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{server_port}/uploads"));

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_refresh_secret,
            jwt_expires_in_seconds,
            jwt_refresh_expires_in_seconds,
            server_port,
            blob_storage_dir,
            blob_public_base_url,
        })
    }
}

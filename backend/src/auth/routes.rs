//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle endpoints like user login, registration, token
//! refreshing, and profile picture upload. They are designed to be
//! integrated into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh", post(refresh_token))
        .route("/upload-profile-picture/{id}", post(upload_profile_picture))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}

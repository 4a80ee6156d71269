//! Middleware for protecting authenticated routes.
//!
//! This module contains logic for validating access tokens on protected
//! API endpoints. Only the Access token kind is accepted here; refresh
//! tokens are rejected by the signature check.

use crate::config::Config;
use crate::utils::jwt::{TokenIssuer, TokenKind};
use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Bearer token authentication middleware
pub async fn jwt_auth(
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check if it's a Bearer token
    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix

    let issuer = TokenIssuer::new(&config);

    match issuer.verify(TokenKind::Access, token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(StatusCode::UNAUTHORIZED),
    }
}

//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (login, registration, token refresh, profile picture upload), parse
//! request data, validate input, and interact with the `auth::service` for
//! core business logic.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::User;
use crate::errors::ServiceError;
use crate::repositories::user_repository::{SqliteUserRepository, UserStore};
use crate::services::blob_storage::BlobStore;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Multipart, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;

fn auth_service(pool: SqlitePool, blobs: Arc<dyn BlobStore>, config: &Config) -> AuthService {
    AuthService::new(Arc::new(SqliteUserRepository::new(pool)), blobs, config)
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(blobs): Extension<Arc<dyn BlobStore>>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<AuthResponse>, (StatusCode, String)> {
    let service = auth_service(pool, blobs, &config);

    match service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(blobs): Extension<Arc<dyn BlobStore>>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<AuthResponse>), (StatusCode, String)> {
    let service = auth_service(pool, blobs, &config);

    match service.register(payload).await {
        Ok(response) => Ok((StatusCode::CREATED, ResponseJson(response))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token refresh request
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(pool): Extension<SqlitePool>,
    Extension(blobs): Extension<Arc<dyn BlobStore>>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<ResponseJson<AuthResponse>, (StatusCode, String)> {
    let service = auth_service(pool, blobs, &config);

    match service.refresh_token(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle profile picture upload request
///
/// Expects a multipart body with a single file under the `profilePicture`
/// field. The file bytes go to blob storage and the resulting URL is bound
/// to the identity named in the path.
#[axum::debug_handler]
pub async fn upload_profile_picture(
    Extension(pool): Extension<SqlitePool>,
    Extension(blobs): Extension<Arc<dyn BlobStore>>,
    Extension(config): Extension<Config>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<ResponseJson<UploadProfilePictureResponse>, (StatusCode, String)> {
    let service = auth_service(pool, blobs, &config);

    let mut file: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        service_error_to_http(ServiceError::validation(format!(
            "Invalid multipart payload: {}",
            e
        )))
    })? {
        if field.name() != Some("profilePicture") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| {
            service_error_to_http(ServiceError::validation(format!(
                "Failed to read uploaded file: {}",
                e
            )))
        })?;

        file = Some((file_name, content_type, bytes.to_vec()));
        break;
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| service_error_to_http(ServiceError::NoFileProvided))?;

    match service
        .bind_profile_picture(id, &file_name, &content_type, &bytes)
        .await
    {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from the access token
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<User>, (StatusCode, String)> {
    let repo = SqliteUserRepository::new(pool);

    match repo.find_by_id(claims.sub).await {
        Ok(Some(user)) => Ok(ResponseJson(user)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found(
            "User",
            claims.sub.to_string(),
        ))),
        Err(e) => Err(service_error_to_http(e.into())),
    }
}

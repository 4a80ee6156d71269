//! JWT token utilities for authentication and authorization.
//!
//! Provides token minting and verification for the two token kinds issued
//! by the auth endpoints. Access and refresh tokens are signed with distinct
//! secrets, so a token of one kind can never verify as the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// The two bearer token kinds issued by the auth endpoints.
///
/// Access tokens are short-lived and authorize API calls; refresh tokens are
/// long-lived and are only accepted by the refresh operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims carried by both token kinds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject user id
    pub sub: i64,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Stateless signer and verifier for access and refresh tokens.
///
/// Tokens are not tracked server-side: expiry is the only lifecycle event,
/// and minting a new pair does not invalidate previously issued tokens.
pub struct TokenIssuer {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_expires_in_seconds: u64,
    refresh_expires_in_seconds: u64,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates a new TokenIssuer from the application config.
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        TokenIssuer {
            access_encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            access_expires_in_seconds: config.jwt_expires_in_seconds,
            refresh_expires_in_seconds: config.jwt_refresh_expires_in_seconds,
            validation,
        }
    }

    /// Mints a signed token of the given kind for a subject user id.
    pub fn mint(&self, kind: TokenKind, subject_id: i64) -> ServiceResult<String> {
        let lifetime_seconds = match kind {
            TokenKind::Access => self.access_expires_in_seconds,
            TokenKind::Refresh => self.refresh_expires_in_seconds,
        };

        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime_seconds as i64);

        let claims = Claims {
            sub: subject_id,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, self.encoding_key(kind))
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validates and decodes a token of the given kind.
    ///
    /// Signature failures (including a token signed for the other kind) and
    /// expiry are reported as distinct errors; both map to 401 at the
    /// handler boundary.
    pub fn verify(&self, kind: TokenKind, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, self.decoding_key(kind), &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::InvalidToken,
            })
    }

    fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Access => &self.access_encoding_key,
            TokenKind::Refresh => &self.refresh_encoding_key,
        }
    }

    fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access => &self.access_decoding_key,
            TokenKind::Refresh => &self.refresh_decoding_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "access-secret".to_string(),
            jwt_refresh_secret: "refresh-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            jwt_refresh_expires_in_seconds: 604800,
            server_port: 3000,
            blob_storage_dir: "./uploads".to_string(),
            blob_public_base_url: "http://localhost:3000/uploads".to_string(),
        }
    }

    #[test]
    fn test_mint_verify_round_trip() {
        let issuer = TokenIssuer::new(&test_config());

        for subject_id in [1, 42, i64::MAX] {
            let token = issuer.mint(TokenKind::Access, subject_id).unwrap();
            let claims = issuer.verify(TokenKind::Access, &token).unwrap();
            assert_eq!(claims.sub, subject_id);
            assert!(claims.exp > claims.iat);
        }
    }

    #[test]
    fn test_key_separation() {
        let issuer = TokenIssuer::new(&test_config());

        let access = issuer.mint(TokenKind::Access, 7).unwrap();
        let refresh = issuer.mint(TokenKind::Refresh, 7).unwrap();

        // Unexpired tokens of the wrong kind fail the signature check.
        assert!(matches!(
            issuer.verify(TokenKind::Refresh, &access),
            Err(ServiceError::InvalidToken)
        ));
        assert!(matches!(
            issuer.verify(TokenKind::Access, &refresh),
            Err(ServiceError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new(&test_config());

        // Expired two hours ago, well past the validation leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            exp: (now - 7200) as usize,
            iat: (now - 10_000) as usize,
        };
        let token = encode(&Header::default(), &claims, &issuer.access_encoding_key).unwrap();

        assert!(matches!(
            issuer.verify(TokenKind::Access, &token),
            Err(ServiceError::TokenExpired)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = TokenIssuer::new(&test_config());

        assert!(matches!(
            issuer.verify(TokenKind::Access, "not-a-jwt"),
            Err(ServiceError::InvalidToken)
        ));
    }

    #[test]
    fn test_refresh_lifetime_exceeds_access() {
        let issuer = TokenIssuer::new(&test_config());

        let access = issuer.mint(TokenKind::Access, 1).unwrap();
        let refresh = issuer.mint(TokenKind::Refresh, 1).unwrap();

        let access_claims = issuer.verify(TokenKind::Access, &access).unwrap();
        let refresh_claims = issuer.verify(TokenKind::Refresh, &refresh).unwrap();

        assert!(refresh_claims.exp > access_claims.exp);
    }
}

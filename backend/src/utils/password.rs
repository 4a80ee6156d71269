//! Password hashing and verification.
//!
//! bcrypt digests embed their own salt and cost factor, so verification is
//! self-describing and needs no separate salt storage. The final comparison
//! inside `bcrypt::verify` is constant-time.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password before it is stored.
///
/// Any string is a valid input, including the empty string; requiring a
/// non-empty password is the caller's concern.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| ServiceError::hashing(e.to_string()))
}

/// Verifies a plaintext password against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> ServiceResult<bool> {
    verify(password, digest).map_err(|e| ServiceError::hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_round_trip() {
        let digest = hash_password("swolemate1234").unwrap();

        assert_ne!(digest, "swolemate1234");
        assert!(verify_password("swolemate1234", &digest).unwrap());
        assert!(!verify_password("wrong password", &digest).unwrap());
    }

    #[test]
    fn test_empty_password_hashes() {
        let digest = hash_password("").unwrap();
        assert!(verify_password("", &digest).unwrap());
        assert!(!verify_password("x", &digest).unwrap());
    }

    #[test]
    fn test_digest_embeds_salt() {
        // Two hashes of the same password differ because each carries its
        // own salt, yet both verify.
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same password", &first).unwrap());
        assert!(verify_password("same password", &second).unwrap());
    }
}

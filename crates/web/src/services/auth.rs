//! Password hashing and verification.
//!
//! Uses Argon2id with a per-password random salt. The rest of the
//! application treats this as an opaque one-way function: handlers store
//! the produced hash string and ask [`verify_password`] whether a supplied
//! password matches it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand::RngCore;
use thiserror::Error;

/// Errors from the password hashing service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Hashing or hash parsing failed.
    #[error("password hashing error: {0}")]
    Hash(String),
}

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if salt encoding or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut rng = rand::rng();

    let mut salt_bytes = [0u8; 16];
    rng.fill_bytes(&mut salt_bytes);

    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` for a mismatch; only malformed stored hashes are
/// errors.
///
/// # Errors
///
/// Returns `AuthError::Hash` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("pw123").unwrap();
        let second = hash_password("pw123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }
}

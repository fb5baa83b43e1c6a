use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

use crate::errors::InternalError;

/// Hash a plaintext password with Argon2id and a fresh random salt
///
/// Credentials are hashed here, at the service boundary, so nothing past
/// this point ever sees or stores a plaintext password.
pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored Argon2 hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, InternalError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_not_plaintext() {
        let hash = hash_password("secret").expect("Failed to hash password");

        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("secret").expect("Failed to hash password");

        assert!(verify_password("secret", &hash).expect("Failed to verify"));
        assert!(!verify_password("wrong", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        let result = verify_password("secret", "not-a-hash");

        assert!(result.is_err());
    }
}

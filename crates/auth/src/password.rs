//! Bcrypt password hashing.

use crate::token::AuthError;

/// Hash a plaintext password with bcrypt at the default cost.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Compare a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash is reported as a hashing error, not as a
/// mismatch.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plain, hash).map_err(|e| AuthError::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}

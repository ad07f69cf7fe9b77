use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Salted bcrypt hash for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Verify a candidate password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    Ok(verify(password, password_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("osoto-gari").unwrap();
        assert!(verify_password("osoto-gari", &hash).unwrap());
        assert!(!verify_password("uchi-mata", &hash).unwrap());
    }
}

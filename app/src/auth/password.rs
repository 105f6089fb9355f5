//! Password hashing using argon2
//!
//! Provides secure password hashing and verification.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, Secret};

/// Password hashing service
///
/// Uses Argon2id with a random salt per hash.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2
    pub fn hash(password: &Secret<String>) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    pub fn verify(password: &Secret<String>, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
            .is_ok())
    }
}

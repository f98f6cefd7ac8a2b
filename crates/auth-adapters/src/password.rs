//! Argon2-based implementation of the `PasswordHasher` port.
//! The stored string is a self-describing PHC hash; verification parses
//! parameters back out of it, so cost changes roll forward transparently.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use domains::ports::PasswordHasher;
use domains::{AppError, Result};

#[derive(Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hasher.verify("hunter2", &hash));
        assert!(!hasher.verify("hunter3", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn same_password_salts_differently() {
        let hasher = Argon2PasswordHasher::new();
        assert_ne!(hasher.hash("pw").unwrap(), hasher.hash("pw").unwrap());
    }
}

//! # cm-auth-session
//!
//! Argon2-based implementation of `AuthProvider`.
//! Handles password hashing for register/login and the opaque tokens
//! stored in the session cookie.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use cm_core::error::{AppError, Result};
use cm_core::traits::AuthProvider;

pub struct SessionAuthProvider;

impl SessionAuthProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SessionAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for SessionAuthProvider {
    /// Hashes with Argon2id and a fresh random salt.
    /// Result format is the PHC string stored in `users.password_hash`.
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
    }

    /// Verifies a login attempt. Malformed stored hashes count as a mismatch
    /// rather than an error so login never leaks hash state.
    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// 32 bytes of OS entropy, hex-encoded. Opaque to the client.
    fn generate_session_token(&self) -> String {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes).expect("OS entropy source unavailable");
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let auth = SessionAuthProvider::new();
        let hash = auth.hash_password("correct horse battery").unwrap();
        assert!(auth.verify_password("correct horse battery", &hash));
        assert!(!auth.verify_password("wrong password", &hash));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let auth = SessionAuthProvider::new();
        assert!(!auth.verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_token_shape() {
        let auth = SessionAuthProvider::new();
        let token = auth.generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let auth = SessionAuthProvider::new();
        assert_ne!(auth.generate_session_token(), auth.generate_session_token());
    }
}

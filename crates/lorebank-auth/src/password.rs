//! Salted one-way password hashing.
//!
//! Hashes are argon2id PHC strings. Verification parses the stored
//! string first, so parameter or version upgrades the format encodes are
//! tolerated transparently — an old hash keeps verifying after the
//! default parameters move on.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

use crate::error::AuthError;

/// Stateless hasher/verifier wrapping the crate-default argon2id setup.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// An unparseable stored hash verifies as false rather than erroring;
    /// the account is then simply not authenticatable.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("unparseable stored password hash: {e}");
                false
            }
        }
    }
}

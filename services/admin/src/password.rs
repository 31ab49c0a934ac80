//! Argon2id password hashing (PHC string format).

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AdminServiceError;

/// Syntactically valid Argon2id hash that matches no password. Verified
/// against when an email lookup misses, so unknown emails cost one KDF
/// evaluation exactly like a wrong password does.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AdminServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AdminServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch. A malformed stored
/// hash is an internal error, not a credential failure.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AdminServiceError> {
    let parsed = argon2::PasswordHash::new(hash)
        .map_err(|e| AdminServiceError::Internal(anyhow::anyhow!("invalid stored hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AdminServiceError::Internal(anyhow::anyhow!(
            "verify password: {e}"
        ))),
    }
}

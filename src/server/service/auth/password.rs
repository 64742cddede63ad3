//! Password hashing with Argon2id in PHC string format.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::server::error::AppError;

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match, or the stored value is not a valid hash
/// - `Err(AppError::InternalError)` - Argon2 failed for another reason
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not in PHC format");
        return Ok(false);
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalError(format!(
            "Failed to verify password: {}",
            e
        ))),
    }
}

//! # Authentication Module
//!
//! Admin access is guarded by a single shared password. The server only ever
//! holds its Argon2 hash (from `ADMIN_PASSWORD_HASH`); clients send the plain
//! password as a bearer token and it is verified against that hash.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use eyre::Result;
use slotbook_core::errors::BookingError;
use tracing::{error, warn};

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm
///
/// The result is a PHC string (algorithm, parameters, salt and hash) suitable
/// for the `ADMIN_PASSWORD_HASH` environment variable.
///
/// # Example
///
/// ```rust
/// use slotbook_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("admin_password").unwrap();
/// assert!(verify_password(&hashed, "admin_password"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash.
///
/// A malformed hash never verifies.
pub fn verify_password(hash: &str, password: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("Stored admin password hash is invalid: {}", err);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects the request unless it carries the admin password.
///
/// When no admin hash is configured every request is rejected.
pub fn authorize_admin(state: &ApiState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(hash) = state.admin_password_hash.as_deref() else {
        warn!("Rejected admin request: no admin password configured");
        return Err(AppError(BookingError::Authentication(
            "Admin access is not configured".to_string(),
        )));
    };

    let Some(token) = bearer_token(headers) else {
        return Err(AppError(BookingError::Authentication(
            "Missing bearer token".to_string(),
        )));
    };

    if !verify_password(hash, token) {
        warn!("Rejected admin request: wrong password");
        return Err(AppError(BookingError::Authentication(
            "Invalid admin password".to_string(),
        )));
    }

    Ok(())
}

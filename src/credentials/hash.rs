use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use super::errors::CredentialError;

/// Hash a password into an Argon2 PHC string.
///
/// Hashing is CPU-bound, so it runs on the blocking thread pool.
pub async fn hash_password(password: &str) -> Result<String, CredentialError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| CredentialError::Hash(e.to_string()))?
}

/// Verify a password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; a malformed stored hash is an error.
pub(crate) async fn verify_password(
    password: &str,
    hashed: &str,
) -> Result<bool, CredentialError> {
    let password = password.to_owned();
    let hashed = hashed.to_owned();
    tokio::task::spawn_blocking(move || {
        let parsed_hash =
            PasswordHash::new(&hashed).map_err(|e| CredentialError::Hash(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    })
    .await
    .map_err(|e| CredentialError::Hash(e.to_string()))?
}

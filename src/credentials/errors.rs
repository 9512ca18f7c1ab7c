use thiserror::Error;

use crate::members::MemberError;

#[derive(Debug, Error, Clone)]
pub enum CredentialError {
    /// The stored hash could not be produced or parsed
    #[error("Password hash error: {0}")]
    Hash(String),

    /// The credential check could not reach or read the backend
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<MemberError> for CredentialError {
    fn from(err: MemberError) -> Self {
        CredentialError::Storage(err.to_string())
    }
}

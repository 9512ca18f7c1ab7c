use thiserror::Error;

use crate::credentials::CredentialError;
use crate::members::MemberError;
use crate::storage::StorageError;
use crate::utils::UtilError;

/// Errors produced by the session lifecycle.
///
/// Callers branch on the variant, never on the message text.
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// No session record exists for this client context
    #[error("No active session")]
    NotAuthenticated,

    /// A session record existed but its expiry had passed
    #[error("Session expired")]
    Expired,

    /// The supplied credentials were rejected
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Credentials validated but the member profile could not be loaded
    #[error("Team member profile not found")]
    ProfileNotFound,

    /// The acting member lacks administrator privileges
    #[error("Unauthorized access")]
    Unauthorized,

    /// The remote session row could not be written or read
    #[error("Session persistence error: {0}")]
    Persistence(String),

    /// The local session record could not be written or read
    #[error("Local store error: {0}")]
    Storage(String),

    /// Error from credential operations
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Error from member profile operations
    #[error("Member error: {0}")]
    Member(#[from] MemberError),

    /// Error from crypto utilities
    #[error("Crypto error: {0}")]
    Util(#[from] UtilError),
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        SessionError::Storage(err.to_string())
    }
}

impl SessionError {
    /// Log the error and return self, allowing method chaining
    pub(crate) fn log(self) -> Self {
        tracing::error!("{}", self);
        self
    }
}

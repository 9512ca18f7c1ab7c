use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum MemberError {
    #[error("Team member not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for MemberError {
    fn from(err: serde_json::Error) -> Self {
        MemberError::InvalidData(err.to_string())
    }
}

use serde::{Deserialize, Serialize};

/// Data stored in the local cache store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheData {
    pub value: String,
}

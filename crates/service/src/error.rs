//! Typed error enum for the service layer.
//!
//! Only explicit operations (save, reset, challenge assignment) return it.
//! Loading and awarding degrade to defaults and logs instead.

use pokexp_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Record could not be serialized.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller provided invalid input (blank user key, bad challenge).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }
}

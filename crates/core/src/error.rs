use std::io;
use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while building or loading progression configuration.
#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = StdResult<T, ProgressError>;

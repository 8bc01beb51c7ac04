//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Storage prefix cannot be empty")]
    EmptyPrefix,

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] stash_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

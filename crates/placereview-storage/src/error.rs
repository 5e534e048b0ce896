//! Storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Store rejected object ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage misconfigured: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        StorageError::Network(e.to_string())
    }
}

//! The object store seam and its construction from config.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use placereview_config::{StorageBackend, StorageConfig};

use crate::error::StorageError;
use crate::fs::FsObjectStore;
use crate::http::HttpObjectStore;

/// A flat key/value object store.
///
/// Keys are `/`-separated relative paths. A `put` to an existing key
/// replaces the object.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reject keys that could escape the store root.
///
/// A `:` in the first segment would read as a URL scheme.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').next().is_some_and(|first| first.contains(':'))
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Build the configured backend.
pub fn from_config(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackend::Fs => {
            let dir = config
                .dir
                .clone()
                .ok_or_else(|| StorageError::Config("storage.dir is required for the fs backend".to_string()))?;
            Ok(Arc::new(FsObjectStore::new(dir)))
        }
        StorageBackend::Http => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| StorageError::Config("storage.url is required for the http backend".to_string()))?;
            let store = HttpObjectStore::new(
                url,
                config.token.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )?;
            Ok(Arc::new(store))
        }
    }
}

//! Directory-backed object store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::StorageError;
use crate::store::{check_key, ObjectStore};

/// Stores each object as a file under `root`.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// readers never observe a half-written object.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>, _content_type: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("part");
        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &path).await?;

        debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

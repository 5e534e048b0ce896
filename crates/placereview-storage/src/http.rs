//! HTTP PUT object store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::StorageError;
use crate::store::{check_key, ObjectStore};

/// Uploads objects with `PUT {base_url}/{key}`.
pub struct HttpObjectStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, StorageError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| StorageError::Config(format!("invalid storage url {}: {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("placereview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        self.base_url
            .join(key)
            .map_err(|e| StorageError::InvalidKey(format!("{}: {}", key, e)))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let url = self.object_url(key)?;
        let size = body.len();

        let mut request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Uploaded {} bytes to {}", size, url);
        Ok(())
    }

    fn describe(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

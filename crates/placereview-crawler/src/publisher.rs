//! Serialize a crawl result and hand it to the object store.

use std::sync::Arc;
use std::time::Duration;

use placereview_config::{KeyScheme, StorageConfig};
use placereview_storage::ObjectStore;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::CrawlError;
use crate::model::CrawlResult;

const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Writes results under a key derived from the target and collection time.
pub struct ResultPublisher {
    store: Arc<dyn ObjectStore>,
    key_prefix: Option<String>,
    key_scheme: KeyScheme,
    retry_delay: Duration,
}

impl ResultPublisher {
    pub fn new(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        let key_prefix = config
            .key_prefix
            .as_deref()
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());

        Self {
            store,
            key_prefix,
            key_scheme: config.key_scheme,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// `{prefix/}{targetId}/{collectedAt}.json`, or `.../latest.json`.
    pub fn key_for(&self, result: &CrawlResult) -> String {
        let name = match self.key_scheme {
            KeyScheme::Timestamped => {
                format!("{}.json", result.collected_at.format("%Y-%m-%dT%H:%M:%SZ"))
            }
            KeyScheme::Latest => "latest.json".to_string(),
        };

        match &self.key_prefix {
            Some(prefix) => format!("{}/{}/{}", prefix, result.target_id, name),
            None => format!("{}/{}", result.target_id, name),
        }
    }

    /// Persist `result`, retrying a failed write once. Returns the key.
    pub async fn publish(&self, result: &CrawlResult) -> Result<String, CrawlError> {
        let key = self.key_for(result);
        let body = serde_json::to_vec_pretty(result)
            .map_err(|e| CrawlError::Persist(format!("failed to serialize result: {}", e)))?;

        if let Err(e) = self.store.put(&key, body.clone(), CONTENT_TYPE).await {
            warn!("Writing {} failed: {}, retrying in {:?}", key, e, self.retry_delay);
            sleep(self.retry_delay).await;
            self.store
                .put(&key, body, CONTENT_TYPE)
                .await
                .map_err(|e| CrawlError::Persist(format!("{}: {}", key, e)))?;
        }

        info!(
            "Published {} reviews to {} at {}",
            result.reviews.len(),
            self.store.describe(),
            key
        );
        Ok(key)
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;

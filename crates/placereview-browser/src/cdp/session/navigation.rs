//! Navigation and render waits.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::scripts;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate and wait until the new document is scriptable.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let reply = self.call("Page.navigate", json!({"url": url})).await?;
        if let Some(error) = reply.get("errorText").and_then(Value::as_str) {
            return Err(CdpError::Navigation(format!("{}: {}", url, error)));
        }

        self.poll_until(scripts::DOCUMENT_READY, LOAD_TIMEOUT, "document load")
            .await?;
        debug!("Loaded {}", url);
        Ok(())
    }

    /// Wait up to `timeout` for `selector` to match.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), CdpError> {
        self.poll_until(&scripts::exists(selector), timeout, selector)
            .await
    }

    /// Re-evaluate `predicate` until it yields `true` or `limit` elapses.
    async fn poll_until(&self, predicate: &str, limit: Duration, what: &str) -> Result<(), CdpError> {
        let deadline = Instant::now() + limit;
        loop {
            if self.evaluate(predicate).await?.as_bool() == Some(true) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(CdpError::Timeout(format!("waiting for {}", what)));
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

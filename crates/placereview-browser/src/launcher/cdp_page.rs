//! [`BrowserPage`] over a CDP page session.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Child;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, PageSession};
use crate::error::BrowserError;
use crate::page::{BrowserPage, ItemQuery, RawNode};
use crate::scripts;

/// A Chrome process spawned for one crawl, with its scratch profile.
pub(super) struct LaunchedChrome {
    pub(super) child: Child,
    pub(super) profile_dir: PathBuf,
}

impl LaunchedChrome {
    pub(super) async fn shutdown(&mut self) {
        info!("Shutting down Chrome...");
        let _ = self.child.kill().await;
        if let Err(e) = tokio::fs::remove_dir_all(&self.profile_dir).await {
            debug!("Failed to remove profile {}: {}", self.profile_dir.display(), e);
        }
    }
}

/// One attached page plus the browser resources it owns.
pub struct CdpPage {
    client: CdpClient,
    session: PageSession,
    chrome: Mutex<Option<LaunchedChrome>>,
    closed: AtomicBool,
}

impl CdpPage {
    pub(super) fn new(client: CdpClient, session: PageSession, chrome: Option<LaunchedChrome>) -> Self {
        Self {
            client,
            session,
            chrome: Mutex::new(chrome),
            closed: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    async fn eval(&self, script: String) -> Result<Value, BrowserError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BrowserError::SessionClosed);
        }
        Ok(self.session.evaluate(&script).await?)
    }
}

#[async_trait]
impl BrowserPage for CdpPage {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.session.navigate(url).await?;
        debug!("Navigated {} to {}", self.session.target_id(), url);
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.session.wait_for_selector(selector, timeout).await?;
        Ok(())
    }

    async fn scroll_height(&self, selector: &str) -> Result<f64, BrowserError> {
        self.eval(scripts::scroll_height(selector))
            .await?
            .as_f64()
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))
    }

    async fn scroll_to_bottom(&self, selector: &str) -> Result<(), BrowserError> {
        self.eval(scripts::scroll_to_bottom(selector)).await?;
        Ok(())
    }

    async fn click_if_visible(&self, selector: &str) -> Result<bool, BrowserError> {
        let value = self.eval(scripts::click_if_visible(selector)).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn click_all_visible(&self, selector: &str) -> Result<usize, BrowserError> {
        let value = self.eval(scripts::click_all_visible(selector)).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    async fn click_with_text(&self, selector: &str, text: &str) -> Result<bool, BrowserError> {
        let value = self.eval(scripts::click_with_text(selector, text)).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<RawNode>, BrowserError> {
        let value = self.eval(scripts::query_items(query)).await?;
        serde_json::from_value(value)
            .map_err(|e| BrowserError::Protocol(format!("Unexpected item payload: {}", e)))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Err(e) = self.client.close_page(self.session.target_id()).await {
            warn!("Failed to close target {}: {}", self.session.target_id(), e);
        }

        if let Some(mut chrome) = self.chrome.lock().await.take() {
            chrome.shutdown().await;
        }

        debug!("Closed page {}", self.session.target_id());
        Ok(())
    }
}

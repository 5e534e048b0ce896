//! Progressive reveal of further reviews.

use std::future::Future;
use std::time::Duration;

use placereview_browser::{BrowserError, BrowserPage};
use placereview_config::{CrawlConfig, SelectorConfig};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

/// Consecutive no-growth steps that count as exhaustion.
const EXHAUSTION_MISSES: u32 = 2;

/// Drives "load more" / scroll-to-bottom and watches the container grow.
pub struct ScrollPaginator {
    container: String,
    load_more: Option<String>,
    expand_text: Option<String>,
    settle_timeout: Duration,
    poll_interval: Duration,
    interaction_timeout: Duration,
    misses: u32,
}

impl ScrollPaginator {
    pub fn new(selectors: &SelectorConfig, crawl: &CrawlConfig) -> Self {
        Self {
            container: selectors.container.clone(),
            load_more: selectors.load_more.clone(),
            expand_text: selectors.expand_text.clone(),
            settle_timeout: Duration::from_millis(crawl.settle_timeout_ms),
            poll_interval: Duration::from_millis(crawl.poll_interval_ms),
            interaction_timeout: Duration::from_millis(crawl.interaction_timeout_ms),
            misses: 0,
        }
    }

    /// One reveal step followed by the exhaustion bookkeeping.
    ///
    /// Returns `false` only once the container has failed to grow on two
    /// consecutive calls.
    pub async fn advance(&mut self, page: &dyn BrowserPage) -> Result<bool, BrowserError> {
        let grew = self.reveal(page).await?;
        Ok(self.record(grew))
    }

    /// Trigger more content and wait for the container to grow, up to the
    /// settle timeout. Returns whether it grew.
    ///
    /// Holds no state, so a failed attempt can simply be retried.
    pub async fn reveal(&self, page: &dyn BrowserPage) -> Result<bool, BrowserError> {
        let before = self
            .bounded("scroll height", page.scroll_height(&self.container))
            .await?;

        let clicked = match &self.load_more {
            Some(selector) => self.bounded("load more", page.click_if_visible(selector)).await?,
            None => false,
        };
        if !clicked {
            self.bounded("scroll", page.scroll_to_bottom(&self.container))
                .await?;
        }

        let deadline = Instant::now() + self.settle_timeout;
        loop {
            let height = self
                .bounded("scroll height", page.scroll_height(&self.container))
                .await?;
            if height > before {
                debug!("Review list grew {} -> {} (load more: {})", before, height, clicked);
                self.expand(page).await;
                return Ok(true);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// Fold one reveal outcome into the miss counter.
    pub fn record(&mut self, grew: bool) -> bool {
        if grew {
            self.misses = 0;
            return true;
        }

        self.misses += 1;
        debug!("No new reviews after settle ({} consecutive)", self.misses);
        self.misses < EXHAUSTION_MISSES
    }

    /// Click the visible "show more" toggles so truncated bodies render in full.
    pub async fn expand(&self, page: &dyn BrowserPage) -> usize {
        let Some(selector) = &self.expand_text else {
            return 0;
        };
        match self.bounded("expand", page.click_all_visible(selector)).await {
            Ok(clicked) => {
                if clicked > 0 {
                    debug!("Expanded {} truncated reviews", clicked);
                }
                clicked
            }
            Err(e) => {
                warn!("Failed to expand truncated reviews: {}", e);
                0
            }
        }
    }

    async fn bounded<T, F>(&self, what: &str, fut: F) -> Result<T, BrowserError>
    where
        F: Future<Output = Result<T, BrowserError>>,
    {
        timeout(self.interaction_timeout, fut).await.map_err(|_| {
            BrowserError::Timeout(format!(
                "{} did not respond within {:?}",
                what, self.interaction_timeout
            ))
        })?
    }
}

#[cfg(test)]
#[path = "paginator_tests.rs"]
mod tests;

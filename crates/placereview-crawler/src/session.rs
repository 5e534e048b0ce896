//! One crawl of one target, from page open to the collected result.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use placereview_browser::{BrowserError, BrowserLauncher, BrowserPage};
use placereview_config::{Config, CrawlConfig, FailurePolicy, SelectorConfig, TargetConfig};
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, error, info, warn};

use crate::dedup::ReviewDeduplicator;
use crate::error::CrawlError;
use crate::extractor::PageExtractor;
use crate::model::CrawlResult;
use crate::paginator::ScrollPaginator;
use crate::retry::RetryPolicy;

struct StepOutcome {
    exhausted: bool,
    /// A sub-step was skipped after exhausting its retries.
    degraded: bool,
}

/// Owns the browser page for one target and runs the reveal/extract loop.
pub struct CrawlSession {
    launcher: Arc<dyn BrowserLauncher>,
    target: TargetConfig,
    selectors: SelectorConfig,
    crawl: CrawlConfig,
    retry: RetryPolicy,
}

impl CrawlSession {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, config: &Config) -> Self {
        Self {
            launcher,
            target: config.target.clone(),
            selectors: config.selectors.clone(),
            crawl: config.crawl.clone(),
            retry: RetryPolicy::from(&config.retry),
        }
    }

    /// Crawl `target_id` and return everything collected.
    ///
    /// The page is closed on every path out of this call. The wall-clock
    /// budget starts here, so navigation and sorting count against it.
    pub async fn run(&self, target_id: &str) -> Result<CrawlResult, CrawlError> {
        let collected_at = Utc::now().trunc_subsecs(0);
        let deadline = Instant::now() + Duration::from_secs(self.crawl.max_duration_secs);
        info!("Starting crawl for target {}", target_id);

        let page = self.launcher.open_page().await?;
        let outcome = self.crawl(page.as_ref(), target_id, collected_at, deadline).await;
        if let Err(e) = page.close().await {
            warn!("Failed to release browser page: {}", e);
        }

        match &outcome {
            Ok(result) => info!(
                "Crawl for {} finished: {} reviews, truncated={}",
                target_id,
                result.reviews.len(),
                result.truncated
            ),
            Err(e) => error!("Crawl for {} failed ({}): {}", target_id, e.kind(), e),
        }
        outcome
    }

    async fn crawl(
        &self,
        page: &dyn BrowserPage,
        target_id: &str,
        collected_at: DateTime<Utc>,
        deadline: Instant,
    ) -> Result<CrawlResult, CrawlError> {
        self.open(page, target_id).await?;

        let extractor = PageExtractor::new(&self.selectors, collected_at.date_naive());
        let mut paginator = ScrollPaginator::new(&self.selectors, &self.crawl);
        let mut dedup = ReviewDeduplicator::new();
        let mut truncated = false;
        paginator.expand(page).await;

        let mut iteration = 0;
        loop {
            if iteration >= self.crawl.max_iterations {
                info!("Reached iteration cap of {}", self.crawl.max_iterations);
                truncated = true;
                break;
            }
            if Instant::now() >= deadline {
                warn!(
                    "Crawl budget of {}s spent before step {}",
                    self.crawl.max_duration_secs,
                    iteration + 1
                );
                truncated = true;
                break;
            }
            iteration += 1;

            let outcome = timeout_at(
                deadline,
                self.step(page, &mut paginator, &extractor, &mut dedup),
            )
            .await;
            match outcome {
                Ok(Ok(step)) => {
                    truncated |= step.degraded;
                    if step.exhausted {
                        info!("No more reviews after {} steps", iteration);
                        break;
                    }
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    warn!(
                        "Crawl budget of {}s exceeded after {} steps",
                        self.crawl.max_duration_secs, iteration
                    );
                    truncated = true;
                    break;
                }
            }
        }

        Ok(CrawlResult {
            target_id: target_id.to_string(),
            collected_at,
            truncated,
            reviews: dedup.into_reviews(),
        })
    }

    /// Navigate, wait for the review list, and apply the sort order.
    async fn open(&self, page: &dyn BrowserPage, target_id: &str) -> Result<(), CrawlError> {
        let url = self.target.review_url(target_id);
        info!("Opening {}", url);

        let address = url.as_str();
        self.retry
            .run_when(
                "navigate",
                |e: &BrowserError| e.is_transient() || matches!(e, BrowserError::NavigationFailed(_)),
                move || page.navigate(address),
            )
            .await
            .map_err(|e| CrawlError::Navigation(format!("{}: {}", url, e)))?;

        page.wait_for_selector(
            &self.selectors.container,
            Duration::from_millis(self.crawl.render_timeout_ms),
        )
        .await
        .map_err(|e| {
            CrawlError::Navigation(format!(
                "review list {} never rendered: {}",
                self.selectors.container, e
            ))
        })?;

        self.sort(page).await;
        Ok(())
    }

    async fn sort(&self, page: &dyn BrowserPage) {
        let Some(selector) = &self.selectors.sort_option else {
            return;
        };
        let label = &self.selectors.sort_label;
        if label.is_empty() {
            return;
        }

        match page.click_with_text(selector, label).await {
            Ok(true) => {
                debug!("Sorted reviews by '{}'", label);
                sleep(Duration::from_millis(self.crawl.sort_settle_ms)).await;
            }
            Ok(false) => warn!("Sort option '{}' not found, keeping default order", label),
            Err(e) => warn!("Failed to sort reviews by '{}': {}", label, e),
        }
    }

    /// One reveal step followed by one extraction pass.
    async fn step(
        &self,
        page: &dyn BrowserPage,
        paginator: &mut ScrollPaginator,
        extractor: &PageExtractor,
        dedup: &mut ReviewDeduplicator,
    ) -> Result<StepOutcome, CrawlError> {
        let mut degraded = false;

        let reveal = {
            let paginator: &ScrollPaginator = paginator;
            self.retry.run("scroll", move || paginator.reveal(page)).await
        };
        let exhausted = match reveal {
            Ok(grew) => !paginator.record(grew),
            Err(e) => {
                self.absorb("scroll", e)?;
                degraded = true;
                false
            }
        };

        match self.retry.run("extract", move || extractor.extract(page)).await {
            Ok(extracted) => {
                if extracted.is_schema_drift(self.crawl.drift_min_nodes) {
                    if dedup.is_empty() {
                        return Err(CrawlError::SchemaDrift {
                            nodes: extracted.nodes,
                        });
                    }
                    warn!(
                        "All {} nodes unreadable after {} reviews collected, skipping pass",
                        extracted.nodes,
                        dedup.len()
                    );
                    degraded = true;
                }
                let added = dedup.merge(extracted.reviews);
                debug!("Extracted {} nodes, {} new, {} total", extracted.nodes, added, dedup.len());
            }
            Err(e) => {
                self.absorb("extract", e)?;
                degraded = true;
            }
        }

        Ok(StepOutcome { exhausted, degraded })
    }

    /// Apply the failure policy to a step whose retries ran out.
    fn absorb(&self, step: &str, e: BrowserError) -> Result<(), CrawlError> {
        if !e.is_transient() {
            return Err(CrawlError::Browser(e));
        }

        let err = CrawlError::InteractionTimeout {
            step: step.to_string(),
            message: e.to_string(),
        };
        match self.crawl.failure_policy {
            FailurePolicy::FailSoft => {
                warn!("Skipping {} step: {}", step, err);
                Ok(())
            }
            FailurePolicy::FailHard => Err(err),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

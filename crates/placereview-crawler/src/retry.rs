//! Bounded retry with exponential backoff around DOM interactions.

use std::future::Future;
use std::time::Duration;

use placereview_browser::BrowserError;
use placereview_config::RetryConfig;
use tokio::time::sleep;
use tracing::warn;

/// Retry policy applied uniformly to every page interaction.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Exponential backoff multiplier.
    pub backoff_multiplier: f64,
    /// Add jitter to delays.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }
}

impl RetryPolicy {
    /// Calculate delay for a given attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay = delay.min(self.max_delay.as_millis() as f64);

        let delay_ms = if self.jitter {
            let jitter = rand_jitter(delay * 0.1);
            (delay + jitter).max(0.0) as u64
        } else {
            delay as u64
        };

        Duration::from_millis(delay_ms)
    }

    /// Run `operation`, retrying transient browser failures.
    pub async fn run<F, Fut, T>(&self, step: &str, operation: F) -> Result<T, BrowserError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, BrowserError>>,
    {
        self.run_when(step, BrowserError::is_transient, operation).await
    }

    /// Run `operation`, retrying failures for which `retryable` holds.
    pub async fn run_when<F, Fut, T, R>(&self, step: &str, retryable: R, operation: F) -> Result<T, BrowserError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, BrowserError>>,
        R: Fn(&BrowserError) -> bool,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !retryable(&e) || attempt >= self.max_retries {
                        return Err(e);
                    }

                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        "{} failed (attempt {}/{}): {}, retrying in {:?}",
                        step,
                        attempt + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );

                    attempt += 1;
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Simple jitter using system time.
fn rand_jitter(max: f64) -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos as f64 / 1_000_000_000.0) * max * 2.0 - max
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;

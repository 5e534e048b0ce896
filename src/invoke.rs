//! Invocation handling: event in, crawl and publish, completion payload out.

use std::io::Read;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use placereview_browser::{BrowserLauncher, ChromeLauncher};
use placereview_config::{Config, ConfigLoader, ConfigValidator};
use placereview_crawler::{CrawlError, CrawlResult, CrawlSession, ResultPublisher};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Target ids become URL path segments and storage key prefixes.
static TARGET_ID: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok());

/// The triggering event. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvokeEvent {
    #[serde(default, alias = "placeId")]
    pub target_id: Option<String>,
}

impl InvokeEvent {
    /// Parse an event given inline, or read from stdin when `raw` is `-`.
    pub fn read(raw: &str) -> Result<Self, CrawlError> {
        if raw == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CrawlError::Config(format!("failed to read event from stdin: {}", e)))?;
            return Self::parse(&buf);
        }
        Self::parse(raw)
    }

    pub fn parse(raw: &str) -> Result<Self, CrawlError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| CrawlError::Config(format!("invalid event payload: {}", e)))
    }

    /// The event's target, falling back to the configured one.
    pub fn resolve_target(&self, config: &Config) -> Result<String, CrawlError> {
        let id = self
            .target_id
            .as_deref()
            .or(config.target.id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CrawlError::Config("no target id in event or configuration".to_string()))?;

        let valid = TARGET_ID.as_ref().is_some_and(|re| re.is_match(id));
        if !valid {
            return Err(CrawlError::Config(format!(
                "invalid target id {:?}: expected letters, digits, '_' or '-'",
                id
            )));
        }
        Ok(id.to_string())
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum CompletionBody {
    #[serde(rename_all = "camelCase")]
    Published {
        target_id: String,
        key: String,
        review_count: usize,
        truncated: bool,
    },
    Failed {
        error: String,
        kind: &'static str,
    },
}

/// `{statusCode, body}` printed on stdout when the invocation ends.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Completion {
    pub status_code: u16,
    pub body: CompletionBody,
}

impl Completion {
    pub fn published(key: String, result: &CrawlResult) -> Self {
        Self {
            status_code: 200,
            body: CompletionBody::Published {
                target_id: result.target_id.clone(),
                key,
                review_count: result.reviews.len(),
                truncated: result.truncated,
            },
        }
    }

    pub fn failure(err: &CrawlError) -> Self {
        Self {
            status_code: 500,
            body: CompletionBody::Failed {
                error: err.to_string(),
                kind: err.kind(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Load configuration, falling back to defaults when the file is absent.
pub(crate) fn load_config(path: &Path) -> Result<Config, CrawlError> {
    Ok(ConfigLoader::load_with_env(path)?)
}

fn validate(config: &Config) -> Result<(), CrawlError> {
    let validation = ConfigValidator::validate(config);
    for warning in &validation.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        return Err(CrawlError::Config(validation.error_summary()));
    }
    Ok(())
}

/// Handle one invocation with a real Chrome.
pub(crate) async fn handle(config: &Config, event: &InvokeEvent) -> Completion {
    let launcher = Arc::new(ChromeLauncher::new(config.browser.clone()));
    handle_with(config, event, launcher).await
}

pub(crate) async fn handle_with(
    config: &Config,
    event: &InvokeEvent,
    launcher: Arc<dyn BrowserLauncher>,
) -> Completion {
    match crawl_and_publish(config, event, launcher).await {
        Ok(completion) => completion,
        Err(e) => {
            error!("Invocation failed ({}): {}", e.kind(), e);
            Completion::failure(&e)
        }
    }
}

async fn crawl_and_publish(
    config: &Config,
    event: &InvokeEvent,
    launcher: Arc<dyn BrowserLauncher>,
) -> Result<Completion, CrawlError> {
    validate(config)?;
    let target_id = event.resolve_target(config)?;
    let store = placereview_storage::from_config(&config.storage)
        .map_err(|e| CrawlError::Config(e.to_string()))?;
    info!("Publishing to {}", store.describe());

    let result = CrawlSession::new(launcher, config).run(&target_id).await?;
    let key = ResultPublisher::new(store, &config.storage).publish(&result).await?;
    Ok(Completion::published(key, &result))
}

#[cfg(test)]
#[path = "invoke_tests.rs"]
mod tests;

//! Crawl pipeline errors.

use placereview_browser::BrowserError;
use placereview_config::ConfigError;
use placereview_storage::StorageError;
use thiserror::Error;

/// Errors that end a crawl invocation.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The target page could not be reached or never rendered its listing.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A scroll or extract step kept failing after its retries.
    #[error("Interaction timed out during {step}: {message}")]
    InteractionTimeout { step: String, message: String },

    /// Review nodes are present but none of them matches the field selectors.
    #[error("Review markup changed: {nodes} review nodes matched but none had readable fields")]
    SchemaDrift { nodes: usize },

    #[error("Failed to persist result: {0}")]
    Persist(String),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CrawlError {
    /// Stable identifier reported in the completion payload.
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlError::Navigation(_) => "navigation",
            CrawlError::InteractionTimeout { .. } => "interaction_timeout",
            CrawlError::SchemaDrift { .. } => "schema_drift",
            CrawlError::Persist(_) => "persist",
            CrawlError::Browser(_) => "browser",
            CrawlError::Config(_) => "config",
        }
    }
}

impl From<ConfigError> for CrawlError {
    fn from(e: ConfigError) -> Self {
        CrawlError::Config(e.to_string())
    }
}

impl From<StorageError> for CrawlError {
    fn from(e: StorageError) -> Self {
        CrawlError::Persist(e.to_string())
    }
}

//! Review records and the per-invocation crawl result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::posted_at::PostedAt;

/// One visitor review as rendered on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Content-derived key, see [`review_identity`].
    pub identity: String,
    pub author: String,
    pub rating: Option<f64>,
    pub text: String,
    pub posted_at: Option<PostedAt>,
    pub images: Vec<String>,
}

/// Stable identity of a review: SHA-256 over author, body and displayed date.
///
/// The displayed date is used verbatim so identities do not shift when the
/// date parser learns a new format.
pub fn review_identity(author: &str, text: &str, posted_raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(author.as_bytes());
    hasher.update(b"|");
    hasher.update(text.as_bytes());
    hasher.update(b"|");
    hasher.update(posted_raw.as_bytes());
    hex::encode(hasher.finalize())
}

/// Everything one invocation collected for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub target_id: String,
    /// Fixed when the session starts.
    pub collected_at: DateTime<Utc>,
    /// Set when a safety bound or a skipped step cut collection short.
    pub truncated: bool,
    /// First-seen order.
    pub reviews: Vec<Review>,
}

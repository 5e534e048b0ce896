//! Read the reviews currently rendered on the listing.

use std::sync::LazyLock;

use chrono::NaiveDate;
use placereview_browser::{BrowserError, BrowserPage, FieldQuery, ItemQuery, RawNode};
use placereview_config::SelectorConfig;
use regex::Regex;
use tracing::debug;

use crate::model::{review_identity, Review};
use crate::posted_at::PostedAt;

const AUTHOR: &str = "author";
const TEXT: &str = "text";
const DATE: &str = "date";
const RATING: &str = "rating";
const IMAGES: &str = "images";

static NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").ok());

/// Result of one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// Parsed reviews in document order.
    pub reviews: Vec<Review>,
    /// Review nodes matched by the item selector.
    pub nodes: usize,
    /// Nodes dropped for having no author, text or rating.
    pub skipped: usize,
}

impl ExtractedPage {
    /// At least `min_nodes` nodes exist and every one of them was unreadable.
    pub fn is_schema_drift(&self, min_nodes: usize) -> bool {
        self.nodes >= min_nodes.max(1) && self.skipped == self.nodes
    }
}

/// Turns the rendered review list into [`Review`] records.
pub struct PageExtractor {
    query: ItemQuery,
    today: NaiveDate,
}

impl PageExtractor {
    /// `today` anchors yearless dates; the session passes its collection date.
    pub fn new(selectors: &SelectorConfig, today: NaiveDate) -> Self {
        let mut fields = vec![
            FieldQuery::text(AUTHOR, &selectors.author),
            FieldQuery::text(TEXT, &selectors.text),
            FieldQuery::text(DATE, &selectors.date),
            FieldQuery::attribute_all(IMAGES, &selectors.images, &selectors.image_attribute),
        ];
        if let Some(rating) = &selectors.rating {
            fields.push(FieldQuery::text(RATING, rating));
        }

        Self {
            query: ItemQuery {
                item: selectors.item.clone(),
                fields,
            },
            today,
        }
    }

    pub fn query(&self) -> &ItemQuery {
        &self.query
    }

    /// Snapshot every review currently in the DOM. Never mutates the page.
    pub async fn extract(&self, page: &dyn BrowserPage) -> Result<ExtractedPage, BrowserError> {
        let nodes = page.query_items(&self.query).await?;
        Ok(self.parse_nodes(&nodes))
    }

    pub fn parse_nodes(&self, nodes: &[RawNode]) -> ExtractedPage {
        let reviews: Vec<Review> = nodes.iter().filter_map(|node| self.parse_node(node)).collect();
        let skipped = nodes.len() - reviews.len();
        if skipped > 0 {
            debug!("Skipped {} of {} review nodes without readable fields", skipped, nodes.len());
        }

        ExtractedPage {
            nodes: nodes.len(),
            skipped,
            reviews,
        }
    }

    /// `None` for a node with no author, text or rating.
    pub fn parse_node(&self, node: &RawNode) -> Option<Review> {
        let author = node.first(AUTHOR).map(str::trim).unwrap_or_default();
        let text = node.first(TEXT).map(str::trim).unwrap_or_default();
        let rating = node.first(RATING).and_then(parse_rating);

        if author.is_empty() && text.is_empty() && rating.is_none() {
            return None;
        }

        let posted_raw = node.first(DATE).map(str::trim).unwrap_or_default();
        let posted_at = (!posted_raw.is_empty()).then(|| PostedAt::parse(posted_raw, self.today));

        let mut images: Vec<String> = Vec::new();
        for src in node.all(IMAGES) {
            let src = src.trim();
            if !images.iter().any(|seen| seen == src) {
                images.push(src.to_string());
            }
        }

        Some(Review {
            identity: review_identity(author, text, posted_raw),
            author: author.to_string(),
            rating,
            text: text.to_string(),
            posted_at,
            images,
        })
    }
}

/// First number in the rendered rating, e.g. `별점 4.5` or `4.5/5`.
fn parse_rating(raw: &str) -> Option<f64> {
    NUMBER.as_ref()?.find(raw)?.as_str().parse().ok()
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;

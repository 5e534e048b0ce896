//! Browser capability consumed by the crawl pipeline.
//!
//! The pipeline only ever talks to a [`BrowserPage`]; the CDP-backed
//! implementation is [`crate::CdpPage`], and tests substitute a
//! simulated page.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// How a field's value is read from the matched element(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldQuery {
    /// Key under which values are returned.
    pub name: String,
    /// Selector relative to the item node.
    pub selector: String,
    /// Attribute to read; rendered text when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Collect every match instead of the first one.
    pub all: bool,
}

impl FieldQuery {
    /// First match, rendered text.
    pub fn text(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            attribute: None,
            all: false,
        }
    }

    /// Every match, the given attribute.
    pub fn attribute_all(
        name: impl Into<String>,
        selector: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            attribute: Some(attribute.into()),
            all: true,
        }
    }
}

/// A repeated item (one per review) plus the fields to read from each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    pub item: String,
    pub fields: Vec<FieldQuery>,
}

/// Field values read from one matched item, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl RawNode {
    /// First non-empty value of a field.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.iter().find(|v| !v.trim().is_empty()))
            .map(|v| v.as_str())
    }

    /// All non-empty values of a field.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.fields
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .map(|v| v.as_str())
                    .filter(|v| !v.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Builder used by simulated pages.
    pub fn with(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.fields
            .insert(name.into(), values.iter().map(|v| v.to_string()).collect());
        self
    }
}

/// A single loaded page the crawler drives.
///
/// Calls are issued strictly one at a time by the session.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Navigate and wait for the document to become interactive.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Wait until `selector` matches, or fail with [`BrowserError::Timeout`].
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Current scroll height of the element matching `selector`.
    async fn scroll_height(&self, selector: &str) -> Result<f64, BrowserError>;

    /// Scroll the element (and the window) to its bottom edge.
    async fn scroll_to_bottom(&self, selector: &str) -> Result<(), BrowserError>;

    /// Click the first match if it is rendered and visible.
    async fn click_if_visible(&self, selector: &str) -> Result<bool, BrowserError>;

    /// Click every visible match; returns how many were clicked.
    async fn click_all_visible(&self, selector: &str) -> Result<usize, BrowserError>;

    /// Click the first match whose text contains `text`.
    async fn click_with_text(&self, selector: &str, text: &str) -> Result<bool, BrowserError>;

    /// Read fields from every item matching the query. Never mutates the page.
    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<RawNode>, BrowserError>;

    /// Release the page and whatever browser resources back it.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// Opens a fresh page per crawl session.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_node_first_skips_blank() {
        let node = RawNode::default().with("author", &["  ", "민지"]);
        assert_eq!(node.first("author"), Some("민지"));
        assert_eq!(node.first("missing"), None);
    }

    #[test]
    fn test_raw_node_all_filters_blank() {
        let node = RawNode::default().with("images", &["a.jpg", "", "b.jpg"]);
        assert_eq!(node.all("images"), vec!["a.jpg", "b.jpg"]);
        assert!(node.all("missing").is_empty());
    }

    #[test]
    fn test_raw_node_deserializes_flat_object() {
        let node: RawNode =
            serde_json::from_str(r#"{"author": ["kim"], "images": []}"#).unwrap();
        assert_eq!(node.first("author"), Some("kim"));
        assert!(node.all("images").is_empty());
    }

    #[test]
    fn test_item_query_serializes_camel_case() {
        let query = ItemQuery {
            item: "li.review".to_string(),
            fields: vec![
                FieldQuery::text("author", "span.name"),
                FieldQuery::attribute_all("images", "img", "src"),
            ],
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["item"], "li.review");
        assert_eq!(json["fields"][0]["all"], false);
        assert!(json["fields"][0].get("attribute").is_none());
        assert_eq!(json["fields"][1]["attribute"], "src");
    }
}

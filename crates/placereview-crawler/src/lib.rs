//! # placereview crawler
//!
//! The review extraction pipeline.
//!
//! A [`CrawlSession`] opens the target's review listing on a
//! [`BrowserPage`](placereview_browser::BrowserPage), then alternates
//! [`ScrollPaginator`] reveal steps with [`PageExtractor`] snapshots, folding
//! each snapshot into a [`ReviewDeduplicator`]. Every DOM interaction runs
//! under the session's [`RetryPolicy`]. The finished [`CrawlResult`] is
//! handed to a [`ResultPublisher`] for storage.

mod dedup;
mod error;
mod extractor;
mod model;
mod paginator;
mod posted_at;
mod publisher;
mod retry;
mod session;

#[cfg(test)]
mod test_page;

pub use dedup::ReviewDeduplicator;
pub use error::CrawlError;
pub use extractor::{ExtractedPage, PageExtractor};
pub use model::{review_identity, CrawlResult, Review};
pub use paginator::ScrollPaginator;
pub use posted_at::PostedAt;
pub use publisher::ResultPublisher;
pub use retry::RetryPolicy;
pub use session::CrawlSession;

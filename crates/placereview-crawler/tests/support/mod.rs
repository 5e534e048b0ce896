//! A scripted review listing for pipeline tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use placereview_browser::{BrowserError, BrowserLauncher, BrowserPage, ItemQuery, RawNode};

pub struct Listing {
    reviews: Vec<RawNode>,
    per_scroll: usize,
    shown: AtomicUsize,
    closed: AtomicBool,
}

impl Listing {
    /// `shown` reviews render up front; every scroll reveals `per_scroll` more.
    pub fn new(reviews: Vec<RawNode>, shown: usize, per_scroll: usize) -> Arc<Self> {
        let shown = shown.min(reviews.len());
        Arc::new(Self {
            reviews,
            per_scroll,
            shown: AtomicUsize::new(shown),
            closed: AtomicBool::new(false),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub fn review(author: &str, text: &str, date: &str) -> RawNode {
    RawNode::default()
        .with("author", &[author])
        .with("text", &[text])
        .with("date", &[date])
        .with("images", &[])
}

pub struct ListingPage(pub Arc<Listing>);

#[async_trait]
impl BrowserPage for ListingPage {
    async fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout: Duration) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn scroll_height(&self, _selector: &str) -> Result<f64, BrowserError> {
        Ok(self.0.shown.load(Ordering::SeqCst) as f64 * 100.0)
    }

    async fn scroll_to_bottom(&self, _selector: &str) -> Result<(), BrowserError> {
        let listing = &self.0;
        let next = (listing.shown.load(Ordering::SeqCst) + listing.per_scroll).min(listing.reviews.len());
        listing.shown.store(next, Ordering::SeqCst);
        Ok(())
    }

    async fn click_if_visible(&self, _selector: &str) -> Result<bool, BrowserError> {
        Ok(false)
    }

    async fn click_all_visible(&self, _selector: &str) -> Result<usize, BrowserError> {
        Ok(0)
    }

    async fn click_with_text(&self, _selector: &str, _text: &str) -> Result<bool, BrowserError> {
        Ok(true)
    }

    async fn query_items(&self, _query: &ItemQuery) -> Result<Vec<RawNode>, BrowserError> {
        let shown = self.0.shown.load(Ordering::SeqCst);
        Ok(self.0.reviews[..shown].to_vec())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.0.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub struct ListingLauncher(pub Arc<Listing>);

#[async_trait]
impl BrowserLauncher for ListingLauncher {
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        Ok(Box::new(ListingPage(self.0.clone())))
    }
}

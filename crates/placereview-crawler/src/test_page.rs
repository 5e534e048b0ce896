//! Simulated review listing for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use placereview_browser::{BrowserError, BrowserLauncher, BrowserPage, ItemQuery, RawNode};

pub(crate) const ROW_HEIGHT: f64 = 120.0;

pub(crate) fn review_node(i: usize) -> RawNode {
    RawNode::default()
        .with("author", &[format!("user{}", i).as_str()])
        .with("text", &[format!("review body {}", i).as_str()])
        .with("date", &[format!("24.10.{}.목", i % 28 + 1).as_str()])
        .with("images", &[])
}

#[derive(Default)]
struct State {
    nodes: Vec<RawNode>,
    visible: usize,
    batch: usize,
    container_missing: bool,
    hang_height: bool,
    /// `query_items` returns blank nodes once it has been called this often.
    garble_after: Option<u32>,
    /// Per op: calls that still succeed, then calls that fail.
    failures: HashMap<&'static str, (u32, u32)>,
    calls: HashMap<&'static str, u32>,
}

/// A listing that reveals `batch` more nodes per scroll until all are shown.
#[derive(Clone, Default)]
pub(crate) struct FakePage {
    state: Arc<Mutex<State>>,
}

impl FakePage {
    pub(crate) fn new(nodes: Vec<RawNode>, initial: usize, batch: usize) -> Self {
        let visible = initial.min(nodes.len());
        let page = Self::default();
        {
            let mut state = page.lock();
            state.nodes = nodes;
            state.visible = visible;
            state.batch = batch;
        }
        page
    }

    pub(crate) fn with_reviews(total: usize, initial: usize, batch: usize) -> Self {
        Self::new((0..total).map(review_node).collect(), initial, batch)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Make the next `times` calls of `op` fail with a timeout.
    pub(crate) fn fail(&self, op: &'static str, times: u32) {
        self.fail_after(op, 0, times);
    }

    /// Let `after` more calls of `op` succeed, then fail the next `times`.
    pub(crate) fn fail_after(&self, op: &'static str, after: u32, times: u32) {
        self.lock().failures.insert(op, (after, times));
    }

    /// Re-render every node without fields after `calls` extraction passes.
    pub(crate) fn garble_after(&self, calls: u32) {
        self.lock().garble_after = Some(calls);
    }

    pub(crate) fn hide_container(&self) {
        self.lock().container_missing = true;
    }

    /// `scroll_height` never resolves.
    pub(crate) fn hang(&self) {
        self.lock().hang_height = true;
    }

    pub(crate) fn calls(&self, op: &str) -> u32 {
        self.lock().calls.get(op).copied().unwrap_or(0)
    }

    pub(crate) fn visible(&self) -> usize {
        self.lock().visible
    }

    fn enter(&self, op: &'static str) -> Result<(), BrowserError> {
        let mut state = self.lock();
        *state.calls.entry(op).or_default() += 1;
        if let Some((ok, left)) = state.failures.get_mut(op) {
            if *ok > 0 {
                *ok -= 1;
            } else if *left > 0 {
                *left -= 1;
                return Err(BrowserError::Timeout(format!("{} injected", op)));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
        self.enter("navigate")
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<(), BrowserError> {
        self.enter("wait_for_selector")?;
        if self.lock().container_missing {
            return Err(BrowserError::Timeout(format!("waiting for {}", selector)));
        }
        Ok(())
    }

    async fn scroll_height(&self, _selector: &str) -> Result<f64, BrowserError> {
        self.enter("scroll_height")?;
        if self.lock().hang_height {
            std::future::pending::<()>().await;
        }
        Ok(self.lock().visible as f64 * ROW_HEIGHT + 400.0)
    }

    async fn scroll_to_bottom(&self, _selector: &str) -> Result<(), BrowserError> {
        self.enter("scroll_to_bottom")?;
        let mut state = self.lock();
        state.visible = (state.visible + state.batch).min(state.nodes.len());
        Ok(())
    }

    async fn click_if_visible(&self, _selector: &str) -> Result<bool, BrowserError> {
        self.enter("click_if_visible")?;
        Ok(false)
    }

    async fn click_all_visible(&self, _selector: &str) -> Result<usize, BrowserError> {
        self.enter("click_all_visible")?;
        Ok(0)
    }

    async fn click_with_text(&self, _selector: &str, _text: &str) -> Result<bool, BrowserError> {
        self.enter("click_with_text")?;
        Ok(true)
    }

    async fn query_items(&self, _query: &ItemQuery) -> Result<Vec<RawNode>, BrowserError> {
        self.enter("query_items")?;
        let state = self.lock();
        let calls = state.calls.get("query_items").copied().unwrap_or(0);
        if state.garble_after.is_some_and(|after| calls > after) {
            return Ok(vec![RawNode::default(); state.visible]);
        }
        Ok(state.nodes[..state.visible].to_vec())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.enter("close")
    }
}

/// Hands out clones of one [`FakePage`].
pub(crate) struct FakeLauncher {
    pub(crate) page: FakePage,
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        Ok(Box::new(self.page.clone()))
    }
}

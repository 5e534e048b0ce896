//! # placereview browser
//!
//! Headless Chrome control for the review crawler.
//!
//! - [`cdp`]: a small Chrome DevTools Protocol client over WebSocket
//! - [`BrowserPage`] / [`BrowserLauncher`]: the capability the crawl
//!   pipeline drives, independent of how the browser is reached
//! - [`ChromeLauncher`]: spawns or attaches to Chrome and applies the
//!   configured locale, timezone, viewport and request blocking

pub mod cdp;
mod error;
mod launcher;
mod page;
mod scripts;

pub use error::BrowserError;
pub use launcher::{CdpPage, ChromeLauncher};
pub use page::{BrowserLauncher, BrowserPage, FieldQuery, ItemQuery, RawNode};

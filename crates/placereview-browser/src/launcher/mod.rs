//! Chrome-backed implementation of [`BrowserLauncher`](crate::BrowserLauncher).

mod cdp_page;
mod chrome;

pub use cdp_page::CdpPage;
pub use chrome::ChromeLauncher;

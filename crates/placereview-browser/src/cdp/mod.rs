//! Minimal Chrome DevTools Protocol client.
//!
//! One WebSocket to the browser target carries every command; page
//! sessions are multiplexed over it with flattened `sessionId`s. Only the
//! commands the crawler issues are wrapped (Target, Page, Runtime,
//! Network and Emulation).
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://127.0.0.1:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::VersionInfo;
pub use session::PageSession;

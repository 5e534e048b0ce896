//! Browser-level errors seen by the crawl pipeline.

use thiserror::Error;

use crate::cdp::CdpError;

/// Errors raised by a [`BrowserPage`](crate::BrowserPage) or launcher.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Chrome not found. Install Chrome or set CHROME_PATH.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Node detached: {0}")]
    NodeDetached(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Browser session closed")]
    SessionClosed,

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl BrowserError {
    /// Whether retrying the same interaction may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BrowserError::Timeout(_) | BrowserError::NodeDetached(_) | BrowserError::ElementNotFound(_)
        )
    }
}

fn looks_detached(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("detached")
        || lower.contains("no node with given id")
        || lower.contains("could not find node")
        || lower.contains("cannot find context")
        || lower.contains("of null")
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Unreachable(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::Navigation(msg) => BrowserError::NavigationFailed(msg),
            CdpError::Timeout(msg) => BrowserError::Timeout(msg),
            CdpError::Script(msg) if looks_detached(&msg) => BrowserError::NodeDetached(msg),
            CdpError::Script(msg) => BrowserError::Script(msg),
            CdpError::Remote { message, .. } if looks_detached(&message) => {
                BrowserError::NodeDetached(message)
            }
            CdpError::Closed | CdpError::Socket(_) => BrowserError::SessionClosed,
            _ => BrowserError::Protocol(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(BrowserError::Timeout("scroll".into()).is_transient());
        assert!(BrowserError::NodeDetached("li".into()).is_transient());
        assert!(BrowserError::ElementNotFound("ul".into()).is_transient());
        assert!(!BrowserError::SessionClosed.is_transient());
        assert!(!BrowserError::NavigationFailed("dns".into()).is_transient());
        assert!(!BrowserError::Script("SyntaxError".into()).is_transient());
    }

    #[test]
    fn test_from_cdp_timeout() {
        let err: BrowserError = CdpError::Timeout("Runtime.evaluate".into()).into();
        assert!(matches!(err, BrowserError::Timeout(_)));
    }

    #[test]
    fn test_from_cdp_detached_script_error() {
        let err: BrowserError =
            CdpError::Script("TypeError: Cannot read properties of null (reading 'innerText')".into()).into();
        assert!(matches!(err, BrowserError::NodeDetached(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_from_cdp_plain_script_error() {
        let err: BrowserError = CdpError::Script("SyntaxError: Unexpected token".into()).into();
        assert!(matches!(err, BrowserError::Script(_)));
    }

    #[test]
    fn test_from_cdp_missing_node_protocol_error() {
        let err: BrowserError = CdpError::Remote {
            code: -32000,
            message: "No node with given id found".into(),
        }
        .into();
        assert!(matches!(err, BrowserError::NodeDetached(_)));
    }

    #[test]
    fn test_from_cdp_other_protocol_error() {
        let err: BrowserError = CdpError::Remote {
            code: -32601,
            message: "'Foo.bar' wasn't found".into(),
        }
        .into();
        assert!(matches!(err, BrowserError::Protocol(_)));
    }

    #[test]
    fn test_from_cdp_closed() {
        let err: BrowserError = CdpError::Closed.into();
        assert!(matches!(err, BrowserError::SessionClosed));
        let err: BrowserError = CdpError::Socket("reset".into()).into();
        assert!(matches!(err, BrowserError::SessionClosed));
    }
}

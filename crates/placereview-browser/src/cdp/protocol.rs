//! Wire frames exchanged with the DevTools endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command. Page-level commands carry the attached `sessionId`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Command<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Incoming frame. Only replies carry an `id`; events are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Frame {
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Value,
    pub error: Option<Fault>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Fault {
    pub code: i64,
    pub message: String,
}

/// `GET /json/version`. Chrome mixes key casing in this document.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub ws_url: String,
}

/// `Runtime.evaluate` reply with `returnByValue`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Evaluation {
    #[serde(default)]
    pub result: Returned,
    pub exception_details: Option<Thrown>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Returned {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thrown {
    pub text: String,
    pub exception: Option<ThrownObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThrownObject {
    pub description: Option<String>,
}

impl Thrown {
    /// The thrown object's description, else the generic `Uncaught` text.
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_else(|| self.text.clone())
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;

use super::*;
use serde_json::json;

#[test]
fn test_browser_command_omits_session_and_null_params() {
    let command = Command {
        id: 3,
        method: "Target.createTarget",
        params: Value::Null,
        session_id: None,
    };
    let text = serde_json::to_string(&command).unwrap();
    assert_eq!(text, r#"{"id":3,"method":"Target.createTarget"}"#);
}

#[test]
fn test_page_command_carries_session() {
    let command = Command {
        id: 7,
        method: "Runtime.evaluate",
        params: json!({"expression": "1"}),
        session_id: Some("S1"),
    };
    let value = serde_json::to_value(&command).unwrap();
    assert_eq!(value["sessionId"], "S1");
    assert_eq!(value["params"]["expression"], "1");
}

#[test]
fn test_event_frame_has_no_id() {
    let frame: Frame =
        serde_json::from_str(r#"{"method": "Page.loadEventFired", "params": {}, "sessionId": "S1"}"#).unwrap();
    assert!(frame.id.is_none());
    assert!(frame.error.is_none());
    assert!(frame.result.is_null());
}

#[test]
fn test_version_info() {
    let version: VersionInfo = serde_json::from_str(
        r#"{
            "Browser": "HeadlessChrome/121.0.0.0",
            "Protocol-Version": "1.3",
            "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/xyz"
        }"#,
    )
    .unwrap();
    assert!(version.browser.starts_with("HeadlessChrome"));
    assert!(version.ws_url.ends_with("/xyz"));
}

#[test]
fn test_thrown_message_prefers_description() {
    let evaluation: Evaluation = serde_json::from_value(json!({
        "result": {"type": "object"},
        "exceptionDetails": {
            "exceptionId": 1,
            "text": "Uncaught",
            "exception": {"type": "object", "description": "TypeError: node is detached"}
        }
    }))
    .unwrap();
    let thrown = evaluation.exception_details.unwrap();
    assert_eq!(thrown.message(), "TypeError: node is detached");
}

#[test]
fn test_thrown_message_falls_back_to_text() {
    let thrown: Thrown = serde_json::from_str(r#"{"text": "Uncaught"}"#).unwrap();
    assert_eq!(thrown.message(), "Uncaught");
}

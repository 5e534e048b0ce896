use super::*;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store(server: &MockServer, token: Option<&str>) -> HttpObjectStore {
    HttpObjectStore::new(
        &format!("{}/bucket", server.uri()),
        token.map(String::from),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_put_sends_body_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/bucket/1234/latest.json"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer secret"))
        .and(body_string("{\"reviews\":[]}"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store(&server, Some("secret"))
        .put("1234/latest.json", b"{\"reviews\":[]}".to_vec(), "application/json")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_put_without_token_sends_no_auth() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/bucket/1234/latest.json"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    store(&server, None)
        .put("1234/latest.json", b"{}".to_vec(), "application/json")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_put_rejected_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("AccessDenied"))
        .mount(&server)
        .await;

    let result = store(&server, None)
        .put("1234/latest.json", b"{}".to_vec(), "application/json")
        .await;

    match result {
        Err(StorageError::Rejected { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "AccessDenied");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_put_unreachable_is_network_error() {
    let store = HttpObjectStore::new("http://127.0.0.1:1/bucket", None, Duration::from_secs(2)).unwrap();
    let result = store.put("1234/latest.json", b"{}".to_vec(), "application/json").await;
    assert!(matches!(result, Err(StorageError::Network(_))));
}

#[test]
fn test_new_rejects_invalid_url() {
    let result = HttpObjectStore::new("not a url", None, Duration::from_secs(1));
    assert!(matches!(result, Err(StorageError::Config(_))));
}

#[test]
fn test_object_url_keeps_base_path() {
    let store = HttpObjectStore::new("https://objects.example.com/bucket", None, Duration::from_secs(1)).unwrap();
    let url = store.object_url("pfx/1234/2024-10-03T09:00:00Z.json").unwrap();
    assert_eq!(
        url.as_str(),
        "https://objects.example.com/bucket/pfx/1234/2024-10-03T09:00:00Z.json"
    );
}

#[tokio::test]
async fn test_put_rejects_scheme_like_key() {
    let server = MockServer::start().await;
    let err = store(&server, None)
        .put("a:b/latest.json", b"{}".to_vec(), "application/json")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidKey(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid(), "{}", result.error_summary());
}

#[test]
fn test_validate_zero_iterations() {
    let mut config = Config::default();
    config.crawl.max_iterations = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "crawl.max_iterations"));
}

#[test]
fn test_validate_zero_duration() {
    let mut config = Config::default();
    config.crawl.max_duration_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "crawl.max_duration_secs"));
}

#[test]
fn test_validate_zero_drift_min_nodes() {
    let mut config = Config::default();
    config.crawl.drift_min_nodes = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "crawl.drift_min_nodes"));
}

#[test]
fn test_validate_empty_selector() {
    let mut config = Config::default();
    config.selectors.item = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "selectors.item"));
}

#[test]
fn test_validate_url_template_without_placeholder() {
    let mut config = Config::default();
    config.target.url_template = "https://example.com/reviews".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "target.url_template"));
}

#[test]
fn test_validate_http_backend_requires_url() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Http;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "storage.url"));
}

#[test]
fn test_validate_http_backend_bad_scheme() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Http;
    config.storage.url = Some("ftp://uploads.example.com".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_http_backend_without_token_warns() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Http;
    config.storage.url = Some("https://uploads.example.com".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "storage.token"));
}

#[test]
fn test_validate_fs_backend_requires_dir() {
    let mut config = Config::default();
    config.storage.dir = None;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "storage.dir"));
}

#[test]
fn test_validate_bad_endpoint() {
    let mut config = Config::default();
    config.browser.endpoint = Some("not a url".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_validate_backoff_multiplier() {
    let mut config = Config::default();
    config.retry.backoff_multiplier = 0.5;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "retry.backoff_multiplier"));
}

#[test]
fn test_validate_high_retries_warning() {
    let mut config = Config::default();
    config.retry.max_retries = 20;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_error_summary_joins_errors() {
    let mut config = Config::default();
    config.crawl.max_iterations = 0;
    config.selectors.container = String::new();

    let summary = ConfigValidator::validate(&config).error_summary();
    assert!(summary.contains("crawl.max_iterations"));
    assert!(summary.contains("selectors.container"));
}

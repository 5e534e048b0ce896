use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.target.id.is_none());
    assert!(config.browser.headless);
    assert_eq!(config.crawl.max_iterations, 200);
    assert_eq!(config.crawl.drift_min_nodes, 3);
    assert_eq!(config.crawl.failure_policy, FailurePolicy::FailSoft);
    assert_eq!(config.storage.backend, StorageBackend::Fs);
}

#[test]
fn test_review_url_substitutes_target() {
    let target = TargetConfig::default();
    assert_eq!(
        target.review_url("31238198"),
        "https://pcmap.place.naver.com/restaurant/31238198/review/visitor"
    );
}

#[test]
fn test_review_url_custom_template() {
    let target = TargetConfig {
        id: None,
        url_template: "http://localhost:8000/{target}.html".to_string(),
    };
    assert_eq!(target.review_url("abc"), "http://localhost:8000/abc.html");
}

#[test]
fn test_browser_config_default() {
    let browser = BrowserConfig::default();
    assert_eq!(browser.debug_port, 9222);
    assert_eq!(browser.locale, "ko-KR");
    assert_eq!(browser.timezone, "Asia/Seoul");
    assert!(browser.mask_webdriver);
    assert!(browser.block_urls.iter().any(|u| u.contains("visitorReview/views")));
    assert!(browser.extra_headers.contains_key("Accept-Language"));
}

#[test]
fn test_selector_config_default() {
    let selectors = SelectorConfig::default();
    assert_eq!(selectors.container, "ul#_review_list");
    assert!(selectors.item.starts_with(&selectors.container));
    assert!(selectors.rating.is_none());
    assert_eq!(selectors.sort_label, "최신순");
    assert!(selectors.load_more.is_some());
}

#[test]
fn test_retry_config_default() {
    let retry = RetryConfig::default();
    assert_eq!(retry.max_retries, 3);
    assert_eq!(retry.base_delay_ms, 500);
    assert!(retry.jitter);
}

#[test]
fn test_failure_policy_deserialize() {
    #[derive(Deserialize)]
    struct Wrapper {
        policy: FailurePolicy,
    }
    let parsed: Wrapper = toml::from_str("policy = \"fail_hard\"").unwrap();
    assert_eq!(parsed.policy, FailurePolicy::FailHard);
    let parsed: Wrapper = toml::from_str("policy = \"fail_soft\"").unwrap();
    assert_eq!(parsed.policy, FailurePolicy::FailSoft);
}

#[test]
fn test_key_scheme_deserialize() {
    #[derive(Deserialize)]
    struct Wrapper {
        scheme: KeyScheme,
    }
    let parsed: Wrapper = toml::from_str("scheme = \"latest\"").unwrap();
    assert_eq!(parsed.scheme, KeyScheme::Latest);
}

#[test]
fn test_storage_config_default() {
    let storage = StorageConfig::default();
    assert_eq!(storage.dir, Some(PathBuf::from("reviews")));
    assert_eq!(storage.key_scheme, KeyScheme::Timestamped);
    assert!(storage.url.is_none());
}

#[test]
fn test_logging_config_default() {
    let logging = LoggingConfig::default();
    assert!(logging.dir.is_none());
    assert!(!logging.json);
}

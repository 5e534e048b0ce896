//! Configuration validation.

use crate::schema::{Config, StorageBackend};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Render all errors as one line, for surfacing through `ConfigError`.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_target(config, &mut result);
        Self::validate_selectors(config, &mut result);
        Self::validate_crawl(config, &mut result);
        Self::validate_retry(config, &mut result);
        Self::validate_storage(config, &mut result);

        result
    }

    fn validate_target(config: &Config, result: &mut ValidationResult) {
        if !config.target.url_template.contains("{target}") {
            result.add_error(ValidationError::new(
                "target.url_template",
                "url_template must contain the {target} placeholder",
            ));
        }
        if let Some(ref endpoint) = config.browser.endpoint {
            if url::Url::parse(endpoint).is_err() {
                result.add_error(ValidationError::new(
                    "browser.endpoint",
                    format!("'{}' is not a valid URL", endpoint),
                ));
            }
        }
    }

    fn validate_selectors(config: &Config, result: &mut ValidationResult) {
        let selectors = &config.selectors;
        let required = [
            ("selectors.container", &selectors.container),
            ("selectors.item", &selectors.item),
            ("selectors.author", &selectors.author),
            ("selectors.text", &selectors.text),
            ("selectors.date", &selectors.date),
        ];
        for (path, value) in required {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(path, "selector cannot be empty"));
            }
        }

        if selectors.sort_option.is_some() && selectors.sort_label.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "selectors.sort_label",
                "sort_option is set but sort_label is empty, sorting will be skipped",
            ));
        }
    }

    fn validate_crawl(config: &Config, result: &mut ValidationResult) {
        let crawl = &config.crawl;
        if crawl.max_iterations == 0 {
            result.add_error(ValidationError::new(
                "crawl.max_iterations",
                "max_iterations must be greater than 0",
            ));
        }
        if crawl.max_duration_secs == 0 {
            result.add_error(ValidationError::new(
                "crawl.max_duration_secs",
                "max_duration_secs must be greater than 0",
            ));
        }
        if crawl.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "crawl.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }
        if crawl.drift_min_nodes == 0 {
            result.add_error(ValidationError::new(
                "crawl.drift_min_nodes",
                "drift_min_nodes must be greater than 0",
            ));
        }
        if crawl.settle_timeout_ms < crawl.poll_interval_ms {
            result.add_warning(ValidationWarning::new(
                "crawl.settle_timeout_ms",
                "settle timeout is shorter than the poll interval, each advance polls once",
            ));
        }
    }

    fn validate_retry(config: &Config, result: &mut ValidationResult) {
        if config.retry.backoff_multiplier < 1.0 {
            result.add_error(ValidationError::new(
                "retry.backoff_multiplier",
                "backoff_multiplier must be at least 1.0",
            ));
        }
        if config.retry.max_retries > 10 {
            result.add_warning(ValidationWarning::new(
                "retry.max_retries",
                "max_retries is very high (>10), a stuck page may consume the whole time budget",
            ));
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        let storage = &config.storage;
        match storage.backend {
            StorageBackend::Fs => {
                if storage.dir.is_none() {
                    result.add_error(ValidationError::new(
                        "storage.dir",
                        "filesystem backend requires a directory",
                    ));
                }
            }
            StorageBackend::Http => match storage.url {
                None => result.add_error(ValidationError::new(
                    "storage.url",
                    "http backend requires a url",
                )),
                Some(ref url) => {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        result.add_error(ValidationError::new(
                            "storage.url",
                            "url must start with http:// or https://",
                        ));
                    }
                    if storage.token.is_none() {
                        result.add_warning(ValidationWarning::new(
                            "storage.token",
                            "no token set, uploads will be unauthenticated",
                        ));
                    }
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

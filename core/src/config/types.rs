use serde::{Deserialize, Serialize};

use crate::source::EndpointKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token. Usually left empty here and supplied via `BRAINTRUST_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.braintrust.dev".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_object_page_size")]
    pub object_page_size: usize,

    #[serde(default = "default_event_page_size")]
    pub event_page_size: usize,

    /// Objects processed concurrently. 1 keeps the run strictly sequential.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,

    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<EndpointKind>,
}

fn default_output_dir() -> String {
    "braintrust_data".to_string()
}

fn default_object_page_size() -> usize {
    10
}

fn default_event_page_size() -> usize {
    100
}

fn default_max_parallel() -> usize {
    1
}

fn default_endpoints() -> Vec<EndpointKind> {
    vec![EndpointKind::Experiment, EndpointKind::Dataset]
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            object_page_size: default_object_page_size(),
            event_page_size: default_event_page_size(),
            max_parallel: default_max_parallel(),
            endpoints: default_endpoints(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// "exponential-backoff", "linear" or "none".
    #[serde(default = "default_retry_strategy")]
    pub strategy: String,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Total attempts per request, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_retry_strategy() -> String {
    "exponential-backoff".to_string()
}

fn default_base_delay_ms() -> u64 {
    250
}

fn default_max_delay_ms() -> u64 {
    5_000
}

fn default_max_attempts() -> u32 {
    1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            strategy: default_retry_strategy(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "evdump_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.api.base_url, "https://api.braintrust.dev");
        assert_eq!(cfg.export.object_page_size, 10);
        assert_eq!(cfg.export.event_page_size, 100);
        assert_eq!(cfg.export.max_parallel, 1);
        assert_eq!(
            cfg.export.endpoints,
            vec![EndpointKind::Experiment, EndpointKind::Dataset]
        );
        assert_eq!(cfg.retry.max_attempts, 1);
        assert!(cfg.logging.console);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [export]
            output_dir = "/tmp/dump"
            endpoints = ["dataset"]

            [retry]
            strategy = "none"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.export.output_dir, "/tmp/dump");
        assert_eq!(cfg.export.endpoints, vec![EndpointKind::Dataset]);
        assert_eq!(cfg.export.event_page_size, 100);
        assert_eq!(cfg.retry.strategy, "none");
        assert_eq!(cfg.retry.base_delay_ms, 250);
    }
}

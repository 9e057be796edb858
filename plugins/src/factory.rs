use std::sync::Arc;

use anyhow::Result;

use evdump_core::api::{AppConfig, ExportSource, NoRetry, RetryConfig, RetryStrategy, RetryingSource};

use crate::retry::{ExponentialBackoffPlugin, LinearRetryPlugin};
use crate::source::HttpSource;

pub fn build_retry(cfg: &RetryConfig) -> Result<Arc<dyn RetryStrategy>> {
    if cfg.max_attempts <= 1 {
        return Ok(Arc::new(NoRetry));
    }
    match cfg.strategy.trim() {
        "exponential-backoff" => Ok(Arc::new(ExponentialBackoffPlugin::new(cfg.clone()))),
        "linear" => Ok(Arc::new(LinearRetryPlugin::new(cfg.clone()))),
        "none" => Ok(Arc::new(NoRetry)),
        other => anyhow::bail!(
            "unknown retry strategy '{}' (expected exponential-backoff, linear or none)",
            other
        ),
    }
}

/// HTTP source for `cfg.api`, wrapped with the configured retry strategy.
pub fn build_source(cfg: &AppConfig, api_key: String) -> Result<Arc<dyn ExportSource>> {
    let http = HttpSource::new(&cfg.api.base_url, api_key, cfg.api.timeout_ms)?;
    let retry = build_retry(&cfg.retry)?;
    tracing::debug!(
        target: "evdump.factory",
        base_url = %cfg.api.base_url,
        retry = retry.name(),
        max_attempts = retry.max_attempts()
    );
    Ok(Arc::new(RetryingSource::new(http, retry)))
}

//! Outbound HTTP client shared by the geocoder and the archive fetcher

use crate::config::HttpConfig;
use anyhow::{Context, Result};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

const USER_AGENT: &str = concat!("trip-climate/", env!("CARGO_PKG_VERSION"));

/// Build a client with an explicit per-call timeout and the configured retry policy.
///
/// Transient failures (connect errors, timeouts, 5xx, 429) are retried up to
/// `max_retries` times with exponential backoff; with `max_retries = 0` every
/// call is a single attempt.
pub fn build_client(config: &HttpConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()
        .with_context(|| "Failed to create HTTP client")?;

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(
            Duration::from_millis(config.min_backoff_ms),
            Duration::from_millis(config.max_backoff_ms),
        )
        .build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

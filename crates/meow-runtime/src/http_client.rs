use std::time::Duration;

use anyhow::{Context, Result};

const USER_AGENT: &str = "meow-cat-command";

/// Builds the plain HTTP client used for the cat API and image size checks.
pub fn build_http_client(request_timeout_ms: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_millis(request_timeout_ms.max(1)))
        .build()
        .context("failed to create cat api http client")
}

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

/// GitHub refuses to render inline images larger than this.
pub const GITHUB_IMAGE_MAX_BYTES: u64 = 10_000_000;

#[async_trait]
/// Trait contract for `ImageSizeChecker` behavior.
pub trait ImageSizeChecker: Send + Sync {
    async fn image_too_big(&self, url: &str) -> Result<bool>;
}

#[derive(Debug, Clone)]
/// Checks image size with a `HEAD` request and the advertised `Content-Length`.
pub struct HttpImageSizeChecker {
    http: reqwest::Client,
    limit_bytes: u64,
}

impl HttpImageSizeChecker {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_limit(http, GITHUB_IMAGE_MAX_BYTES)
    }

    pub fn with_limit(http: reqwest::Client, limit_bytes: u64) -> Self {
        Self { http, limit_bytes }
    }
}

#[async_trait]
impl ImageSizeChecker for HttpImageSizeChecker {
    async fn image_too_big(&self, url: &str) -> Result<bool> {
        let response = self
            .http
            .head(url)
            .send()
            .await
            .with_context(|| format!("HEAD request for {url} failed"))?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            bail!("failing {} response from HEAD {url}", status.as_u16());
        }
        Ok(content_length_exceeds(response.headers(), self.limit_bytes))
    }
}

/// A missing or unparseable `Content-Length` counts as small enough.
pub(crate) fn content_length_exceeds(headers: &reqwest::header::HeaderMap, limit: u64) -> bool {
    headers
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .is_some_and(|size| size > limit)
}

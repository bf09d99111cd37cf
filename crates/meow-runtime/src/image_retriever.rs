//! Cat image retrieval against thecatapi.com.
//!
//! A lookup builds the search URL from the category, the cached API key and the
//! animated flag, fetches the first result, checks that the host will render
//! it and formats it as a markdown image embed. The "grumpy" categories skip
//! the network entirely and always resolve to one fixed picture.

use std::{path::Path, sync::Arc, sync::OnceLock, time::Duration};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use meow_issues::github_transport_helpers::{is_success_status, truncate_for_error};
use regex::Regex;
use serde::Deserialize;

use crate::credential_cache::CredentialCache;
use crate::image_size::ImageSizeChecker;

pub const DEFAULT_CAT_API_ENDPOINT: &str =
    "https://api.thecatapi.com/v1/images/search?format=json&results_per_page=1";
pub const GRUMPY_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/e/ee/Grumpy_Cat_by_Gage_Skidmore.jpg";

#[async_trait]
/// Trait contract for `Clowder` behavior: produce one rendered cat image.
pub trait Clowder: Send + Sync {
    async fn read_cat(&self, category: &str, movie_cat: bool) -> Result<String>;
}

fn grumpy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*(no|grumpy)\s*$").expect("grumpy category pattern compiles")
    })
}

pub fn is_grumpy_category(category: &str) -> bool {
    grumpy_pattern().is_match(category)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
/// One entry of the cat API search response.
pub struct CatResult {
    #[serde(rename = "url", default)]
    pub image: String,
}

impl CatResult {
    pub fn grumpy() -> Self {
        Self {
            image: GRUMPY_URL.to_string(),
        }
    }

    pub fn format(&self) -> Result<String> {
        if self.image.is_empty() {
            bail!("empty image url");
        }
        url::Url::parse(&self.image)
            .with_context(|| format!("invalid image url {}", self.image))?;
        Ok(format!("![cat image]({})", self.image))
    }
}

/// Cat API client sharing one credential cache across all command invocations.
pub struct CatApiClowder {
    http: reqwest::Client,
    endpoint: String,
    credentials: CredentialCache,
    size_checker: Arc<dyn ImageSizeChecker>,
}

impl CatApiClowder {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        key_refresh_interval: Duration,
        size_checker: Arc<dyn ImageSizeChecker>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            credentials: CredentialCache::new(key_refresh_interval),
            size_checker,
        }
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    pub fn refresh_key(&self, key_path: Option<&Path>) -> bool {
        self.credentials.refresh(key_path)
    }

    /// Search URL including the API key when one is cached.
    pub fn url(&self, category: &str, movie_cat: bool) -> String {
        self.credentials
            .with_key(|key| build_search_url(&self.endpoint, category, key, movie_cat))
    }

    fn redacted_url(&self, category: &str, movie_cat: bool) -> String {
        build_search_url(&self.endpoint, category, "", movie_cat)
    }
}

fn query_escape(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn build_search_url(endpoint: &str, category: &str, key: &str, movie_cat: bool) -> String {
    let mut uri = endpoint.to_string();
    if !category.is_empty() {
        uri.push_str("&category=");
        uri.push_str(&query_escape(category));
    }
    if !key.is_empty() {
        uri.push_str("&api_key=");
        uri.push_str(&query_escape(key));
    }
    if movie_cat {
        uri.push_str("&mime_types=gif");
    }
    uri
}

#[async_trait]
impl Clowder for CatApiClowder {
    async fn read_cat(&self, category: &str, movie_cat: bool) -> Result<String> {
        if is_grumpy_category(category) {
            return CatResult::grumpy().format();
        }

        let uri = self.url(category, movie_cat);
        let log_uri = self.redacted_url(category, movie_cat);
        let response = self
            .http
            .get(&uri)
            .send()
            .await
            .with_context(|| format!("could not read cat from {log_uri}"))?;
        let status = response.status().as_u16();
        if !is_success_status(status) {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "failing {status} response from {log_uri}: {}",
                truncate_for_error(&body, 200)
            );
        }
        let cats = response
            .json::<Vec<CatResult>>()
            .await
            .with_context(|| format!("failed to decode cat response from {log_uri}"))?;
        let Some(cat) = cats.into_iter().next() else {
            bail!("no cats in response from {log_uri}");
        };
        if cat.image.is_empty() {
            bail!("no image url in response from {log_uri}");
        }

        let too_big = self
            .size_checker
            .image_too_big(&cat.image)
            .await
            .with_context(|| format!("could not validate image size {}", cat.image))?;
        if too_big {
            bail!("longcat is too long: {}", cat.image);
        }
        cat.format()
    }
}

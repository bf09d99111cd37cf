use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use meow_issues::github_transport_helpers::{is_success_status, truncate_for_error};
use serde_json::json;

#[async_trait]
/// Trait contract for `CommentPoster` behavior.
pub trait CommentPoster: Send + Sync {
    async fn create_comment(
        &self,
        org: &str,
        repo: &str,
        number: u64,
        is_pr: bool,
        comment: &str,
    ) -> Result<()>;

    fn quote_author_for_comment(&self, author: &str) -> String;
}

#[derive(Clone)]
/// Posts issue and pull request comments through the GitHub REST API.
pub struct GithubCommentPoster {
    http: reqwest::Client,
    api_base: String,
}

impl GithubCommentPoster {
    pub fn new(api_base: String, token: String, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("meow-cat-command"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid github authorization header")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http: client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CommentPoster for GithubCommentPoster {
    // Pull requests share the issue comments endpoint, so `is_pr` does not
    // change the route. Posting is never retried here.
    async fn create_comment(
        &self,
        org: &str,
        repo: &str,
        number: u64,
        _is_pr: bool,
        comment: &str,
    ) -> Result<()> {
        let payload = json!({ "body": comment });
        let response = self
            .http
            .post(format!(
                "{}/repos/{}/{}/issues/{}/comments",
                self.api_base, org, repo, number
            ))
            .json(&payload)
            .send()
            .await
            .context("github api create issue comment request failed")?;
        let status = response.status().as_u16();
        if !is_success_status(status) {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "github api create issue comment failed with status {status}: {}",
                truncate_for_error(&body, 800)
            );
        }
        tracing::debug!(
            repo = %format!("{org}/{repo}"),
            number,
            "posted cat command comment"
        );
        Ok(())
    }

    fn quote_author_for_comment(&self, author: &str) -> String {
        author.to_string()
    }
}

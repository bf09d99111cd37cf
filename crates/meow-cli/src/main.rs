//! `meow` binary: answers the `/meow` commands of one comment event.

mod bootstrap_helpers;
mod cli_args;

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use meow_issues::issue_comment_event::GenericCommentEvent;
use meow_runtime::{
    build_http_client, config_help, plugin_help, CatApiClowder, CatCommandRuntime,
    CatPluginConfig, GithubCommentPoster, HttpImageSizeChecker,
};
use serde_json::json;

use bootstrap_helpers::init_tracing;
use cli_args::Cli;

fn load_event(path: &Path) -> Result<GenericCommentEvent> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read comment event {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse comment event {}", path.display()))
}

async fn run(cli: Cli) -> Result<()> {
    let config = CatPluginConfig {
        key_path: cli.cat_api_key_path.clone(),
    };
    if cli.print_help {
        let rendered = serde_json::to_string_pretty(&json!({
            "plugin": plugin_help(),
            "config": config_help(&config),
        }))
        .context("failed to render plugin help")?;
        println!("{rendered}");
        return Ok(());
    }

    let event_file = cli
        .event_file
        .as_deref()
        .ok_or_else(|| anyhow!("--event-file is required"))?;
    let token = cli
        .github_token
        .clone()
        .ok_or_else(|| anyhow!("--github-token (or GITHUB_TOKEN) is required"))?;
    let event = load_event(event_file)?;

    let http = build_http_client(cli.request_timeout_ms)?;
    let clowder = CatApiClowder::new(
        http.clone(),
        cli.cat_api_endpoint.clone(),
        Duration::from_millis(cli.key_refresh_interval_ms),
        Arc::new(HttpImageSizeChecker::new(http)),
    );
    let poster = GithubCommentPoster::new(cli.github_api_base.clone(), token, cli.request_timeout_ms)?;
    let runtime = CatCommandRuntime::new(Arc::new(clowder), Arc::new(poster), config);

    let handled = runtime.handle_generic_comment_event(&event).await?;
    tracing::info!(
        repo = %event.repo.as_slug(),
        number = event.number,
        handled,
        "cat command event processed"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse()).await
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::load_event;

    #[test]
    fn functional_load_event_reads_comment_event_json() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("event.json");
        std::fs::write(
            &path,
            r#"{"repo":{"namespace":"owner","name":"repo"},"number":3,"author":{"login":"alice"},"body":"/meow"}"#,
        )
        .expect("write event");

        let event = load_event(&path).expect("event");
        assert_eq!(event.number, 3);
        assert_eq!(event.author.login, "alice");
    }

    #[test]
    fn regression_load_event_reports_path_on_invalid_json() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("event.json");
        std::fs::write(&path, "{not json").expect("write event");

        let error = load_event(&path).expect_err("invalid json");
        assert!(error.to_string().contains("failed to parse comment event"));
    }
}

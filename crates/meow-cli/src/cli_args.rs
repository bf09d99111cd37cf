use std::path::PathBuf;

use clap::Parser;
use meow_runtime::DEFAULT_CAT_API_ENDPOINT;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "meow",
    about = "Reply to /meow and /meowvie issue comments with a cat image",
    version
)]
/// Public struct `Cli` used across meow components.
pub struct Cli {
    #[arg(
        long = "event-file",
        env = "MEOW_EVENT_FILE",
        help = "Path to a JSON comment event (repo, number, is_pr, action, author, body, link)"
    )]
    pub event_file: Option<PathBuf>,

    #[arg(
        long = "github-api-base",
        env = "MEOW_GITHUB_API_BASE",
        default_value = "https://api.github.com",
        help = "Base URL for the GitHub REST API"
    )]
    pub github_api_base: String,

    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token used to post issue and pull request comments"
    )]
    pub github_token: Option<String>,

    #[arg(
        long = "cat-api-key-path",
        env = "MEOW_CAT_API_KEY_PATH",
        help = "Plain-text file holding the thecatapi.com API key; re-read at most once per refresh interval"
    )]
    pub cat_api_key_path: Option<PathBuf>,

    #[arg(
        long = "cat-api-endpoint",
        env = "MEOW_CAT_API_ENDPOINT",
        default_value = DEFAULT_CAT_API_ENDPOINT,
        help = "Cat image search endpoint, including its fixed query string"
    )]
    pub cat_api_endpoint: String,

    #[arg(
        long = "key-refresh-interval-ms",
        env = "MEOW_KEY_REFRESH_INTERVAL_MS",
        default_value_t = 60_000,
        value_parser = parse_positive_u64,
        help = "Minimum delay between two reads of the API key file"
    )]
    pub key_refresh_interval_ms: u64,

    #[arg(
        long = "request-timeout-ms",
        env = "MEOW_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Timeout applied to every outbound HTTP request"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "print-help",
        default_value_t = false,
        help = "Print the plugin and configuration help as JSON and exit"
    )]
    pub print_help: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{parse_positive_u64, Cli};
    use meow_runtime::DEFAULT_CAT_API_ENDPOINT;

    #[test]
    fn unit_parse_positive_u64_rejects_zero() {
        assert_eq!(parse_positive_u64("5"), Ok(5));
        assert!(parse_positive_u64("0").is_err());
        assert!(parse_positive_u64("many").is_err());
    }

    #[test]
    fn functional_cli_defaults_point_at_public_endpoints() {
        let cli = Cli::try_parse_from(["meow", "--event-file", "event.json"]).expect("cli");
        assert_eq!(cli.cat_api_endpoint, DEFAULT_CAT_API_ENDPOINT);
        assert_eq!(cli.github_api_base, "https://api.github.com");
        assert_eq!(cli.key_refresh_interval_ms, 60_000);
        assert!(!cli.print_help);
    }

    #[test]
    fn regression_cli_rejects_zero_timeout() {
        let parsed = Cli::try_parse_from(["meow", "--request-timeout-ms", "0"]);
        assert!(parsed.is_err());
    }
}

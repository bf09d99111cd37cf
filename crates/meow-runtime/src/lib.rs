//! Runtime for the `/meow` issue and pull request comment command.
//!
//! Wires the time-gated credential cache, the cat image retriever with its
//! size checks, and the GitHub comment poster into the bounded-retry command
//! handler.

pub mod cat_plugin_config;
pub mod command_handler;
pub mod credential_cache;
pub mod github_api_client;
pub mod http_client;
pub mod image_retriever;
pub mod image_size;

pub use cat_plugin_config::{config_help, plugin_help, CatPluginConfig, PluginHelp};
pub use command_handler::{handle, CatCommandError, CatCommandRuntime, MAX_CAT_ATTEMPTS};
pub use credential_cache::{CredentialCache, DEFAULT_KEY_REFRESH_INTERVAL};
pub use github_api_client::{CommentPoster, GithubCommentPoster};
pub use http_client::build_http_client;
pub use image_retriever::{
    is_grumpy_category, CatApiClowder, CatResult, Clowder, DEFAULT_CAT_API_ENDPOINT, GRUMPY_URL,
};
pub use image_size::{HttpImageSizeChecker, ImageSizeChecker, GITHUB_IMAGE_MAX_BYTES};

//! `/meow` command orchestration: credential refresh, bounded retrieval
//! retries and exactly one reply comment per invocation.

use std::{future::Future, sync::Arc};

use meow_issues::issue_command_parser::{parse_cat_commands, CatCommandMatch};
use meow_issues::issue_comment::render_comment_response_raw;
use meow_issues::issue_comment_event::{CommentAction, GenericCommentEvent};
use thiserror::Error;

use crate::cat_plugin_config::CatPluginConfig;
use crate::github_api_client::CommentPoster;
use crate::image_retriever::{CatApiClowder, Clowder};

pub const MAX_CAT_ATTEMPTS: usize = 3;
pub const BAD_CATEGORY_MESSAGE: &str =
    "Bad category. Please see https://api.thecatapi.com/api/categories/list";
pub const CAT_API_DOWN_MESSAGE: &str = "https://thecatapi.com appears to be down";

#[derive(Debug, Error)]
/// Enumerates supported `CatCommandError` values.
pub enum CatCommandError {
    #[error("could not find a valid cat image")]
    NoValidImage,
    #[error("failed to post cat comment: {0:#}")]
    PostComment(#[source] anyhow::Error),
}

/// Serves one `/meow` invocation.
///
/// `refresh_key` is called and its future awaited once before any retrieval.
/// Retrieval is attempted up to [`MAX_CAT_ATTEMPTS`] times; the first success is posted and returned. When
/// every attempt fails a fallback message is posted instead and
/// [`CatCommandError::NoValidImage`] is returned whether or not that post
/// succeeded.
pub async fn handle<F, Fut>(
    movie_cat: bool,
    category: &str,
    poster: &dyn CommentPoster,
    event: &GenericCommentEvent,
    clowder: &dyn Clowder,
    refresh_key: F,
) -> Result<(), CatCommandError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    refresh_key().await;

    let org = event.repo.namespace.as_str();
    let repo = event.repo.name.as_str();
    let number = event.number;
    let author = poster.quote_author_for_comment(&event.author.login);

    for attempt in 1..=MAX_CAT_ATTEMPTS {
        match clowder.read_cat(category, movie_cat).await {
            Ok(reply) => {
                let comment = render_comment_response_raw(&event.body, &event.link, &author, &reply);
                return poster
                    .create_comment(org, repo, number, event.is_pr, &comment)
                    .await
                    .map_err(CatCommandError::PostComment);
            }
            Err(error) => {
                tracing::error!(
                    repo = %event.repo.as_slug(),
                    number,
                    attempt,
                    error = %format!("{error:#}"),
                    "failed to get cat image"
                );
            }
        }
    }

    let message = if category.is_empty() {
        CAT_API_DOWN_MESSAGE
    } else {
        BAD_CATEGORY_MESSAGE
    };
    let comment = render_comment_response_raw(&event.body, &event.link, &author, message);
    if let Err(error) = poster
        .create_comment(org, repo, number, event.is_pr, &comment)
        .await
    {
        tracing::error!(
            repo = %event.repo.as_slug(),
            number,
            error = %format!("{error:#}"),
            "failed to leave fallback comment"
        );
    }
    Err(CatCommandError::NoValidImage)
}

/// Routes comment events to [`handle`] with one shared retriever.
pub struct CatCommandRuntime {
    clowder: Arc<CatApiClowder>,
    poster: Arc<dyn CommentPoster>,
    config: CatPluginConfig,
}

impl CatCommandRuntime {
    pub fn new(
        clowder: Arc<CatApiClowder>,
        poster: Arc<dyn CommentPoster>,
        config: CatPluginConfig,
    ) -> Self {
        Self {
            clowder,
            poster,
            config,
        }
    }

    pub fn config(&self) -> &CatPluginConfig {
        &self.config
    }

    pub async fn handle_generic_comment(
        &self,
        command: &CatCommandMatch,
        event: &GenericCommentEvent,
    ) -> Result<(), CatCommandError> {
        let clowder = Arc::clone(&self.clowder);
        let key_path = self.config.key_path.clone();
        handle(
            command.is_movie(),
            &command.arg,
            self.poster.as_ref(),
            event,
            self.clowder.as_ref(),
            move || async move {
                // The key file read holds the credential write lock; keep it
                // off the async workers.
                let refreshed =
                    tokio::task::spawn_blocking(move || clowder.refresh_key(key_path.as_deref()))
                        .await;
                if let Err(error) = refreshed {
                    tracing::error!(error = %error, "cat api key refresh task failed");
                }
            },
        )
        .await
    }

    /// Runs every `/meow` command found in a newly created comment and returns
    /// how many ran. Edited and deleted comments are ignored.
    pub async fn handle_generic_comment_event(
        &self,
        event: &GenericCommentEvent,
    ) -> Result<usize, CatCommandError> {
        if event.action != CommentAction::Created {
            tracing::debug!(
                repo = %event.repo.as_slug(),
                number = event.number,
                action = event.action.as_str(),
                "ignoring non-create comment event"
            );
            return Ok(0);
        }

        let commands = parse_cat_commands(&event.body);
        let mut first_error = None;
        for command in &commands {
            if let Err(error) = self.handle_generic_comment(command, event).await {
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(commands.len()),
        }
    }
}

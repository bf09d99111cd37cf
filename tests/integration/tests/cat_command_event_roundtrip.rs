use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use async_trait::async_trait;
use httpmock::prelude::*;
use meow_issues::issue_comment_event::GenericCommentEvent;
use meow_runtime::{
    CatApiClowder, CatCommandError, CatCommandRuntime, CatPluginConfig, GithubCommentPoster,
    ImageSizeChecker, MAX_CAT_ATTEMPTS,
};
use serde_json::json;
use tempfile::tempdir;

struct AlwaysFits;

#[async_trait]
impl ImageSizeChecker for AlwaysFits {
    async fn image_too_big(&self, _url: &str) -> Result<bool> {
        Ok(false)
    }
}

struct NeverFits;

#[async_trait]
impl ImageSizeChecker for NeverFits {
    async fn image_too_big(&self, _url: &str) -> Result<bool> {
        Ok(true)
    }
}

fn build_clowder(
    cat_server: &MockServer,
    key_refresh_interval: Duration,
    size_checker: Arc<dyn ImageSizeChecker>,
) -> Arc<CatApiClowder> {
    Arc::new(CatApiClowder::new(
        reqwest::Client::new(),
        cat_server.url("/v1/images/search?format=json&results_per_page=1"),
        key_refresh_interval,
        size_checker,
    ))
}

fn build_runtime(
    clowder: Arc<CatApiClowder>,
    github_server: &MockServer,
    config: CatPluginConfig,
) -> CatCommandRuntime {
    let poster = GithubCommentPoster::new(github_server.base_url(), "token".to_string(), 5_000)
        .expect("github poster");
    CatCommandRuntime::new(clowder, Arc::new(poster), config)
}

fn comment_event(number: u64, body: &str) -> GenericCommentEvent {
    serde_json::from_value(json!({
        "repo": { "namespace": "owner", "name": "repo" },
        "number": number,
        "is_pr": true,
        "action": "created",
        "author": { "login": "octocat" },
        "body": body,
        "link": format!("https://github.com/owner/repo/pull/{number}#issuecomment-{number}"),
    }))
    .expect("comment event")
}

#[tokio::test]
async fn integration_concurrent_commands_each_post_exactly_one_comment() {
    let cat_server = MockServer::start();
    let search = cat_server.mock(|when, then| {
        when.method(GET).path("/v1/images/search");
        then.status(200)
            .json_body(json!([{ "url": "https://cdn2.thecatapi.com/images/shared.jpg" }]));
    });
    let github_server = MockServer::start();
    let posts = (1..=4_u64)
        .map(|number| {
            github_server.mock(|when, then| {
                when.method(POST)
                    .path(format!("/repos/owner/repo/issues/{number}/comments"))
                    .body_includes("shared.jpg")
                    .body_includes(format!("#issuecomment-{number}"));
                then.status(201).json_body(json!({ "id": number }));
            })
        })
        .collect::<Vec<_>>();

    let runtime = Arc::new(build_runtime(
        build_clowder(&cat_server, Duration::from_secs(60), Arc::new(AlwaysFits)),
        &github_server,
        CatPluginConfig::default(),
    ));
    let tasks = (1..=4_u64)
        .map(|number| {
            let runtime = Arc::clone(&runtime);
            tokio::spawn(async move {
                runtime
                    .handle_generic_comment_event(&comment_event(number, "/meow"))
                    .await
            })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        let handled = task.await.expect("join").expect("handled");
        assert_eq!(handled, 1);
    }

    search.assert_calls(4);
    for post in posts {
        post.assert_calls(1);
    }
}

#[tokio::test]
async fn integration_key_file_is_reread_only_after_refresh_window() {
    let temp = tempdir().expect("tempdir");
    let key_path = temp.path().join("cat-api-key");
    std::fs::write(&key_path, "first-key\n").expect("write key");

    let cat_server = MockServer::start();
    let first_key = cat_server.mock(|when, then| {
        when.method(GET)
            .path("/v1/images/search")
            .query_param("api_key", "first-key");
        then.status(200).json_body(json!([{ "url": "https://example.com/1.jpg" }]));
    });
    let second_key = cat_server.mock(|when, then| {
        when.method(GET)
            .path("/v1/images/search")
            .query_param("api_key", "second-key");
        then.status(200).json_body(json!([{ "url": "https://example.com/2.jpg" }]));
    });
    let github_server = MockServer::start();
    let post = github_server.mock(|when, then| {
        when.method(POST).path("/repos/owner/repo/issues/9/comments");
        then.status(201).json_body(json!({ "id": 1 }));
    });

    let clowder = build_clowder(&cat_server, Duration::from_secs(60), Arc::new(AlwaysFits));
    let runtime = build_runtime(
        Arc::clone(&clowder),
        &github_server,
        CatPluginConfig {
            key_path: Some(key_path.clone()),
        },
    );

    runtime
        .handle_generic_comment_event(&comment_event(9, "/meow"))
        .await
        .expect("first");
    std::fs::write(&key_path, "second-key\n").expect("rewrite key");
    runtime
        .handle_generic_comment_event(&comment_event(9, "/meow"))
        .await
        .expect("second");
    first_key.assert_calls(2);
    second_key.assert_calls(0);

    // Step the cache past its window instead of sleeping through it.
    assert!(clowder
        .credentials()
        .refresh_at(Some(&key_path), Instant::now() + Duration::from_secs(61)));
    assert_eq!(clowder.credentials().current_key(), "second-key");
    runtime
        .handle_generic_comment_event(&comment_event(9, "/meow"))
        .await
        .expect("third");
    first_key.assert_calls(2);
    second_key.assert_calls(1);
    post.assert_calls(3);
}

#[tokio::test]
async fn integration_movie_variant_retries_oversized_images_then_falls_back() {
    let cat_server = MockServer::start();
    let search = cat_server.mock(|when, then| {
        when.method(GET)
            .path("/v1/images/search")
            .query_param("mime_types", "gif")
            .query_param("category", "sinks");
        then.status(200)
            .json_body(json!([{ "url": "https://cdn2.thecatapi.com/images/longcat.gif" }]));
    });
    let github_server = MockServer::start();
    let fallback = github_server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues/3/comments")
            .body_includes("Bad category");
        then.status(201).json_body(json!({ "id": 1 }));
    });

    let runtime = build_runtime(
        build_clowder(&cat_server, Duration::from_secs(60), Arc::new(NeverFits)),
        &github_server,
        CatPluginConfig::default(),
    );
    let error = runtime
        .handle_generic_comment_event(&comment_event(3, "/meowvie sinks"))
        .await
        .expect_err("every image is too long");

    assert!(matches!(error, CatCommandError::NoValidImage));
    search.assert_calls(MAX_CAT_ATTEMPTS);
    fallback.assert_calls(1);
}

pub const ABOUT_THIS_BOT: &str = "Instructions for interacting with me using PR comments are available in the repository contributing guide. If you have questions or suggestions related to my behavior, please file an issue against this bot's repository.";

/// Quotes every line of `body` with a leading `>`.
pub fn quote_comment_body(body: &str) -> String {
    body.split('\n')
        .map(|line| format!(">{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_comment_response(author: &str, message: &str, reason: &str) -> String {
    format!("@{author}: {message}\n\n<details>\n\n{reason}\n\n{ABOUT_THIS_BOT}\n</details>")
}

/// Renders a reply threaded under the original comment: the reply addressed to
/// `author`, then a collapsed block quoting `body` and linking to `body_url`.
pub fn render_comment_response_raw(
    body: &str,
    body_url: &str,
    author: &str,
    reply: &str,
) -> String {
    let reason = format!(
        "In response to [this]({body_url}):\n\n{}\n",
        quote_comment_body(body)
    );
    render_comment_response(author, reply, &reason)
}

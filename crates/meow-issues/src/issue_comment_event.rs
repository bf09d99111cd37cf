use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// Public struct `GithubUser` used across meow components.
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// Repository coordinates of the issue or pull request that was commented on.
pub struct CommentRepo {
    /// Organization or user namespace owning the repository.
    pub namespace: String,
    pub name: String,
}

impl CommentRepo {
    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `CommentAction` values.
pub enum CommentAction {
    #[default]
    Created,
    Edited,
    Deleted,
}

impl CommentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Edited => "edited",
            Self::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// A parsed comment on an issue or pull request.
pub struct GenericCommentEvent {
    pub repo: CommentRepo,
    pub number: u64,
    #[serde(default)]
    pub is_pr: bool,
    #[serde(default)]
    pub action: CommentAction,
    pub author: GithubUser,
    pub body: String,
    /// Permalink of the comment that triggered the event.
    #[serde(default)]
    pub link: String,
}

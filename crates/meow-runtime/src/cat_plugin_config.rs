use std::{collections::BTreeMap, path::PathBuf};

use meow_issues::issue_comment_event::CommentAction;
use serde::{Deserialize, Serialize};

pub const PLUGIN_NAME: &str = "cat";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Public struct `CatPluginConfig` used across meow components.
pub struct CatPluginConfig {
    /// Plain-text file holding the thecatapi.com API key.
    #[serde(default)]
    pub key_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Public struct `PluginCommandHelp` used across meow components.
pub struct PluginCommandHelp {
    pub name: &'static str,
    pub arg_pattern: &'static str,
    pub arg_optional: bool,
    pub description: &'static str,
    pub trigger_action: CommentAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Public struct `PluginHelp` used across meow components.
pub struct PluginHelp {
    pub name: &'static str,
    pub description: &'static str,
    pub commands: Vec<PluginCommandHelp>,
}

pub fn plugin_help() -> PluginHelp {
    PluginHelp {
        name: PLUGIN_NAME,
        description:
            "The cat plugin adds a cat image to an issue or PR in response to the `/meow` command.",
        commands: vec![PluginCommandHelp {
            name: "meow|meowvie",
            arg_pattern: ".+",
            arg_optional: true,
            description: "Add a cat image to the issue or PR",
            trigger_action: CommentAction::Created,
        }],
    }
}

pub fn config_help(config: &CatPluginConfig) -> BTreeMap<String, String> {
    let key_path = config
        .key_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    BTreeMap::from([(
        String::new(),
        format!("The cat plugin uses an api key for thecatapi.com stored in {key_path}."),
    )])
}

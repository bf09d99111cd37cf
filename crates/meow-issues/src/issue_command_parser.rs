use std::sync::OnceLock;

use regex::Regex;

pub const MEOW_COMMAND: &str = "meow";
pub const MEOWVIE_COMMAND: &str = "meowvie";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `/meow` or `/meowvie` invocation found in a comment body.
pub struct CatCommandMatch {
    pub name: String,
    /// Free-text category argument, empty when none was supplied.
    pub arg: String,
}

impl CatCommandMatch {
    pub fn is_movie(&self) -> bool {
        self.name == MEOWVIE_COMMAND
    }
}

fn cat_command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?mi)^/(?:lh-)?(meowvie|meow)(?:[ \t]+([^\r\n]+?))?[ \t]*\r?$")
            .expect("cat command pattern compiles")
    })
}

pub fn parse_cat_commands(body: &str) -> Vec<CatCommandMatch> {
    cat_command_pattern()
        .captures_iter(body)
        .map(|captures| CatCommandMatch {
            name: captures
                .get(1)
                .map(|value| value.as_str().to_ascii_lowercase())
                .unwrap_or_default(),
            arg: captures
                .get(2)
                .map(|value| value.as_str().trim().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

//! Shared helpers for the `/meow` issue and pull request comment command.
//! This crate provides the inbound comment event model, command matching,
//! response rendering, and transport helpers consumed by the runtime crate.

pub mod github_transport_helpers;
pub mod issue_command_parser;
pub mod issue_comment;
pub mod issue_comment_event;

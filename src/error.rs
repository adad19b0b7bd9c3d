use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by every subcommand except `format-hook`, which swallows them.
#[derive(Error, Debug)]
pub enum DevhubError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid role `{0}`. Roles are kebab-case, e.g. backend-dev or code-reviewer.")]
    InvalidRole(String),

    #[error("Section body is empty. Pass --message or pipe notes on stdin.")]
    EmptyBody,

    #[error("devhub already initialized ({0} exists)")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, DevhubError>;

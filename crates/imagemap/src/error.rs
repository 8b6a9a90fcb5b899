//! CLI error types.

use imagemap_config::ConfigError;
use imagemap_renderer::{PARSER_NAME, ParseError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}", .0.report(PARSER_NAME))]
    Build(#[from] ParseError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The failure was already written to the command output.
    #[error("")]
    Reported,
}

impl CliError {
    /// Whether the error was already shown to the user.
    pub(crate) fn is_reported(&self) -> bool {
        matches!(self, Self::Reported)
    }
}

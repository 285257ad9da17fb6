//! Error kinds surfaced to the operator.

use std::path::PathBuf;

use crate::core::types::Ecosystem;

/// Failures the setup flow distinguishes.
///
/// `InvalidTarget` and `EmptySelection` are recoverable at the prompt; the
/// rest end the run.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid repository {}: {reason}", path.display())]
    InvalidTarget { path: PathBuf, reason: String },

    #[error("select at least one linter")]
    EmptySelection,

    #[error("unknown linter '{key}'")]
    UnknownLinter { key: String },

    #[error("failed to install {ecosystem} dependencies: {message}")]
    Install {
        ecosystem: Ecosystem,
        message: String,
    },

    #[error("failed to set up hooks: {message}")]
    Hook { message: String },
}

/// Result type for setup stages.
pub type SetupResult<T> = std::result::Result<T, SetupError>;

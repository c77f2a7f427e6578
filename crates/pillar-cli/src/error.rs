//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A list entry that is not a number.
    #[error("Invalid number '{0}' in list")]
    InvalidNumber(String),

    /// Malformed input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Unreadable or malformed configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Refusing to overwrite an existing file.
    #[error("File already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

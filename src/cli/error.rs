//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use super::exit_codes;
use crate::predicate::InvalidStatementError;

/// error returned by command execution
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    InvalidArgs(String),

    /// config file could not be located, read or parsed
    #[error("{0:#}")]
    Config(anyhow::Error),

    /// config file parsed but some entries are invalid
    #[error("configuration has {} error(s): {}", .errors.len(), .path.display())]
    ConfigInvalid { path: PathBuf, errors: Vec<String> },

    #[error(transparent)]
    InvalidStatement(#[from] InvalidStatementError),

    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exit_codes::INVALID_ARGS,
            CliError::Config(_) | CliError::ConfigInvalid { .. } => exit_codes::CONFIG_ERROR,
            CliError::InvalidStatement(_) => exit_codes::INVALID_STATEMENT,
            CliError::Other(_) => exit_codes::ERROR,
        }
    }
}

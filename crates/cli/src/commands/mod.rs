//! CLI command implementations.

pub mod check;
pub mod hierarchy;
pub mod output;
pub mod session;
pub mod users;

use pms_admin::{AppError, ConfigError, PmsError};
use thiserror::Error;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Workflow error; displays the operator-facing message.
    #[error("{}", .0.user_message())]
    App(#[from] AppError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("Failed to create PMS client: {0}")]
    Client(#[from] PmsError),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Some identifiers passed to `check` are invalid.
    #[error("{0} invalid identifier(s)")]
    InvalidInput(usize),

    /// Operator declined or input ended.
    #[error("Aborted")]
    Aborted,
}

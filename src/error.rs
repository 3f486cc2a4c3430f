//! Error handling module
//!
//! Centralized error types for the terminal front end.

use crate::console::CommandError;
use crate::domain::WizardError;
use crate::lookup::LookupError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Input errors
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    // Startup and I/O errors
    #[error("Bank lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Errors the user can fix by typing something else
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Command(_) | AppError::Wizard(_))
    }
}

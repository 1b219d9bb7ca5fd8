//! Error types for prompt-repo
//!
//! Every failure in the crate funnels into [`PromptRepoError`]. The command
//! layer turns it into a structured error object so callers never have to
//! match on storage-specific errors.

use thiserror::Error;

/// Result type alias for prompt-repo operations
pub type Result<T> = std::result::Result<T, PromptRepoError>;

/// Main error type for prompt-repo
#[derive(Debug, Error)]
pub enum PromptRepoError {
    /// Command not found in registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid command arguments
    #[error("Invalid arguments for command '{command}': {reason}")]
    InvalidArgs { command: String, reason: String },

    /// Required field missing or empty
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PromptRepoError {
    fn from(err: anyhow::Error) -> Self {
        PromptRepoError::Other(err.to_string())
    }
}

impl From<String> for PromptRepoError {
    fn from(err: String) -> Self {
        PromptRepoError::Other(err)
    }
}

impl From<&str> for PromptRepoError {
    fn from(err: &str) -> Self {
        PromptRepoError::Other(err.to_string())
    }
}

impl PromptRepoError {
    /// Build an `InvalidArgs` error for a command
    pub fn invalid_args(command: &str, reason: impl Into<String>) -> Self {
        PromptRepoError::InvalidArgs {
            command: command.to_string(),
            reason:  reason.into(),
        }
    }

    /// Get user-friendly error message for display
    pub fn user_message(&self) -> String {
        match self {
            PromptRepoError::CommandNotFound(cmd) => {
                format!(
                    "Command '{}' not found. Run `prompt-repo commands` for available commands.",
                    cmd
                )
            },
            PromptRepoError::InvalidArgs { command, reason } => {
                format!("Invalid arguments for '{}': {}", command, reason)
            },
            PromptRepoError::ValidationError(msg) => {
                format!("Please fill in all required fields: {}", msg)
            },
            PromptRepoError::DatabaseError(err) => {
                format!("Database error: {}", err)
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            PromptRepoError::CommandNotFound(_) => "command",
            PromptRepoError::InvalidArgs { .. } => "arguments",
            PromptRepoError::ValidationError(_) => "validation",
            PromptRepoError::SerdeError(_) => "serialization",
            PromptRepoError::DatabaseError(_) => "database",
            PromptRepoError::IoError(_) => "io",
            PromptRepoError::ConfigError(_) => "config",
            PromptRepoError::Other(_) => "other",
        }
    }
}

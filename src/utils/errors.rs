//! Error handling for the standup bot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.
//!
//! A message that is not a standup and a storage lookup that finds nothing
//! are not errors: the former is reported through
//! [`StandupOutcome::Rejected`](crate::services::standups::StandupOutcome)
//! and the latter through `Option::None`.

use thiserror::Error;

/// Main error type for the standup bot
#[derive(Error, Debug)]
pub enum StandupBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Message delivery to chat {chat_id} failed: {reason}")]
    Delivery { chat_id: i64, reason: String },

    #[error("No team is tracked for chat {chat_id}")]
    TeamNotFound { chat_id: i64 },

    #[error("GitHub API error: {0}")]
    Github(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for standup bot operations
pub type Result<T> = std::result::Result<T, StandupBotError>;

impl StandupBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StandupBotError::Database(_) => false,
            StandupBotError::Migration(_) => false,
            StandupBotError::Storage(_) => false,
            StandupBotError::Telegram(_) => true,
            StandupBotError::Delivery { .. } => true,
            StandupBotError::TeamNotFound { .. } => false,
            StandupBotError::Github(_) => true,
            StandupBotError::Config(_) => false,
            StandupBotError::Http(_) => true,
            StandupBotError::Serialization(_) => false,
            StandupBotError::Io(_) => true,
            StandupBotError::UrlParse(_) => false,
            StandupBotError::InvalidInput(_) => false,
        }
    }

    /// Whether the error came from the persistence layer
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            StandupBotError::Database(_) | StandupBotError::Migration(_) | StandupBotError::Storage(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StandupBotError::Database(_) => ErrorSeverity::Critical,
            StandupBotError::Migration(_) => ErrorSeverity::Critical,
            StandupBotError::Storage(_) => ErrorSeverity::Critical,
            StandupBotError::Config(_) => ErrorSeverity::Critical,
            StandupBotError::TeamNotFound { .. } => ErrorSeverity::Error,
            StandupBotError::Delivery { .. } => ErrorSeverity::Warning,
            StandupBotError::Github(_) => ErrorSeverity::Warning,
            StandupBotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

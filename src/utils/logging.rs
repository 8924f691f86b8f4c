//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the standup bot.

use tracing::{info, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{StandupBotError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped, so the caller
/// has to keep it alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "standup-bot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| StandupBotError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log group lifecycle events
pub fn log_group_event(chat_id: i64, event: &str, username: Option<&str>, details: Option<&str>) {
    info!(
        chat_id = chat_id,
        event = event,
        username = username,
        details = details,
        "Group event occurred"
    );
}

/// Log standup persistence events
pub fn log_standup_event(chat_id: i64, message_id: i64, action: &str, username: &str) {
    info!(
        chat_id = chat_id,
        message_id = message_id,
        action = action,
        username = username,
        "Standup event occurred"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log outbound replies
pub fn log_reply(chat_id: i64, reply_to: Option<i64>, kind: &str) {
    debug!(
        chat_id = chat_id,
        reply_to = reply_to,
        kind = kind,
        "Reply sent"
    );
}

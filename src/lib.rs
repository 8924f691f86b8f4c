//! Standup Bot
//!
//! A Telegram bot for teams running daily asynchronous standups in a group
//! chat. It checks whether messages are proper standup reports, stores
//! them, reviews linked pull requests and keeps track of who is expected to
//! post, following the chat's actual membership.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{StandupBotError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, MemoryStorage, Storage};
pub use handlers::EventRouter;
pub use services::ServiceFactory;
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

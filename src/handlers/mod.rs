//! Bot handlers module
//!
//! This module contains the update handling layer:
//! - The Telegram adapter turning teloxide messages into inbound updates
//! - The router deciding what an update means
//! - Command handlers for bot commands

pub mod commands;
pub mod router;
pub mod telegram;

// Re-export commonly used handler items
pub use commands::{Command, handle_command};
pub use router::EventRouter;

use crate::models::InboundMessage;
use crate::services::{Messenger, SendOptions};
use crate::utils::errors::Result;
use crate::utils::logging::log_reply;

/// Reply to `message` in its chat
pub(crate) async fn reply(messenger: &dyn Messenger, message: &InboundMessage, text: &str, kind: &str) -> Result<()> {
    messenger
        .send(message.chat.id, text, SendOptions::reply_to(message.id))
        .await?;
    log_reply(message.chat.id, Some(message.id), kind);
    Ok(())
}

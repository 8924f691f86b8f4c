//! Outbound messaging
//!
//! [`Messenger`] is how the bot talks back to chats. [`TelegramMessenger`]
//! implements it with teloxide; tests substitute a recording double.

use async_trait::async_trait;
use teloxide::{
    Bot,
    prelude::Requester,
    payloads::SendMessageSetters,
    sugar::request::RequestLinkPreviewExt,
    types::{ChatId, MessageId, ReplyParameters},
};
use tracing::{warn, debug};
use crate::utils::errors::{StandupBotError, Result};

/// Per-message delivery options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub reply_to_message_id: Option<i64>,
    pub disable_link_preview: bool,
}

impl SendOptions {
    pub fn reply_to(message_id: i64) -> Self {
        Self {
            reply_to_message_id: Some(message_id),
            disable_link_preview: false,
        }
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }
}

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to a chat; failures surface as [`StandupBotError::Delivery`]
    async fn send(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<()>;
}

/// Teloxide-based implementation of [`Messenger`]
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);

        if let Some(message_id) = options.reply_to_message_id {
            let message_id = i32::try_from(message_id).map_err(|_| {
                StandupBotError::InvalidInput(format!("message id {} out of range", message_id))
            })?;
            request = request.reply_parameters(ReplyParameters::new(MessageId(message_id)));
        }

        if options.disable_link_preview {
            request = request.disable_link_preview(true);
        }

        match request.await {
            Ok(_) => {
                debug!(chat_id = chat_id, "Message delivered");
                Ok(())
            }
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Failed to deliver message");
                Err(StandupBotError::Delivery { chat_id, reason: e.to_string() })
            }
        }
    }
}

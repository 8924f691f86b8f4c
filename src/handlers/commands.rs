//! Command handlers
//!
//! `/help`, `/join` and `/leave`. Joining and leaving by command take the
//! same path as the matching membership events.

use teloxide::utils::command::BotCommands;
use tracing::debug;
use crate::handlers::reply;
use crate::models::InboundMessage;
use crate::services::{LeaveOutcome, MemberJoin, ServiceFactory};
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Standup bot commands:")]
pub enum Command {
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Start posting standups in this chat")]
    Join,
    #[command(description = "Stop posting standups in this chat")]
    Leave,
}

impl Command {
    /// Parse `text` as a command addressed to this bot
    ///
    /// Commands addressed to other bots (`/help@otherbot`) and unknown
    /// commands yield `None`.
    pub fn from_text(text: &str, bot_username: &str) -> Option<Self> {
        match Self::parse(text, bot_username) {
            Ok(command) => Some(command),
            Err(e) => {
                debug!(error = ?e, "Not a command for this bot");
                None
            }
        }
    }
}

/// Main command dispatcher
pub async fn handle_command(
    services: &ServiceFactory,
    message: &InboundMessage,
    command: Command,
    locale: &str,
) -> Result<()> {
    let i18n = &services.i18n;

    if matches!(command, Command::Join | Command::Leave) && message.chat.is_private() {
        let text = i18n.t("commands.group_only", locale, None);
        return reply(services.messenger.as_ref(), message, &text, "group_only").await;
    }

    let Some(author) = message.from.as_ref() else {
        return Ok(());
    };

    match command {
        Command::Help => {
            let text = i18n.t("commands.help", locale, None);
            reply(services.messenger.as_ref(), message, &text, "help").await
        }
        Command::Join => {
            match services.membership_service.join_member(&message.chat, author, locale).await? {
                // The welcome message already went out
                MemberJoin::Registered { .. } => Ok(()),
                MemberJoin::AlreadyPresent => {
                    let text = i18n.t_with("commands.already_joined", locale, "mention", &author.mention());
                    reply(services.messenger.as_ref(), message, &text, "already_joined").await
                }
            }
        }
        Command::Leave => {
            let key = match services.membership_service.handle_leave(&message.chat, author).await? {
                LeaveOutcome::StanduperRemoved { .. } => "commands.left",
                LeaveOutcome::AlreadyAbsent => "commands.not_member",
                LeaveOutcome::BotRemoved => return Ok(()),
            };
            let text = i18n.t_with(key, locale, "mention", &author.mention());
            reply(services.messenger.as_ref(), message, &text, "leave").await
        }
    }
}

//! Telegram adapter
//!
//! Converts teloxide messages into the transport-independent
//! [`InboundMessage`] the router works with.

use teloxide::types::{Chat, Message, User};
use crate::models::{ChatInfo, ChatKind, ChatMember, InboundMessage, InboundUpdate};

pub fn chat_info(chat: &Chat) -> ChatInfo {
    let kind = if chat.is_private() {
        ChatKind::Private
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_channel() {
        ChatKind::Channel
    } else {
        ChatKind::Group
    };

    ChatInfo {
        id: chat.id.0,
        kind,
        title: chat.title().unwrap_or_default().to_string(),
        // Message payloads carry no chat description
        description: String::new(),
        username: chat.username().unwrap_or_default().to_string(),
    }
}

pub fn chat_member(user: &User) -> ChatMember {
    ChatMember {
        // Telegram user ids fit in 52 bits
        id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        is_bot: user.is_bot,
        language_code: user.language_code.clone(),
    }
}

pub fn inbound_message(msg: &Message) -> InboundMessage {
    let text = msg.text().or_else(|| msg.caption()).unwrap_or_default();

    InboundMessage {
        id: i64::from(msg.id.0),
        chat: chat_info(&msg.chat),
        text: text.to_string(),
        from: msg.from.as_ref().map(chat_member),
        left_member: msg.left_chat_member().map(chat_member),
        new_members: msg
            .new_chat_members()
            .map(|members| members.iter().map(chat_member).collect())
            .unwrap_or_default(),
    }
}

pub fn new_message(msg: &Message) -> InboundUpdate {
    InboundUpdate::new_message(inbound_message(msg))
}

pub fn edited_message(msg: &Message) -> InboundUpdate {
    InboundUpdate::edited(inbound_message(msg))
}

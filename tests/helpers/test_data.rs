//! Test data helpers for creating test objects
//!
//! This module provides helper functions for creating chats, members and
//! inbound messages.

use standup_bot::models::{ChatInfo, ChatKind, ChatMember, InboundMessage, InboundUpdate};
use standup_bot::services::PullRequestMetadata;

pub const BOT_ID: i64 = 999;
pub const BOT_USERNAME: &str = "standupbot";
pub const GROUP_CHAT_ID: i64 = -1001;

/// Scenario A text, addressed to the bot
pub const GOOD_STANDUP: &str = "@standupbot yesterday: fixed bug\ntoday: tests\nblockers: none";

pub fn group_chat(chat_id: i64, title: &str) -> ChatInfo {
    ChatInfo {
        id: chat_id,
        kind: ChatKind::Supergroup,
        title: title.to_string(),
        description: "Daily standups".to_string(),
        username: String::new(),
    }
}

pub fn team_chat() -> ChatInfo {
    group_chat(GROUP_CHAT_ID, "Backend Team")
}

pub fn private_chat(user_id: i64) -> ChatInfo {
    ChatInfo {
        id: user_id,
        kind: ChatKind::Private,
        title: String::new(),
        description: String::new(),
        username: String::new(),
    }
}

pub fn member(id: i64, username: &str) -> ChatMember {
    ChatMember {
        id,
        username: Some(username.to_string()),
        first_name: username.to_string(),
        is_bot: false,
        language_code: Some("en".to_string()),
    }
}

pub fn other_bot(id: i64, username: &str) -> ChatMember {
    ChatMember {
        is_bot: true,
        ..member(id, username)
    }
}

pub fn the_bot() -> ChatMember {
    other_bot(BOT_ID, BOT_USERNAME)
}

pub fn text_message(id: i64, chat: ChatInfo, from: ChatMember, text: &str) -> InboundMessage {
    InboundMessage {
        id,
        chat,
        text: text.to_string(),
        from: Some(from),
        left_member: None,
        new_members: Vec::new(),
    }
}

pub fn join_message(chat: ChatInfo, added_by: ChatMember, members: Vec<ChatMember>) -> InboundMessage {
    InboundMessage {
        new_members: members,
        ..text_message(1, chat, added_by, "")
    }
}

pub fn leave_message(chat: ChatInfo, removed_by: ChatMember, left: ChatMember) -> InboundMessage {
    InboundMessage {
        left_member: Some(left),
        ..text_message(1, chat, removed_by, "")
    }
}

pub fn update(message: InboundMessage) -> InboundUpdate {
    InboundUpdate::new_message(message)
}

pub fn good_pull_request(url: &str) -> PullRequestMetadata {
    PullRequestMetadata {
        html_url: url.to_string(),
        title: "Add retries to the importer".to_string(),
        body: Some("Failed imports are retried three times. Closes #42".to_string()),
        draft: false,
        additions: 40,
        deletions: 10,
        changed_files: 3,
    }
}

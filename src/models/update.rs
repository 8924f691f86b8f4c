//! Inbound update model
//!
//! Transport-independent shape of the chat events the bot reacts to. The
//! Telegram adapter in [`crate::handlers::telegram`] builds these from
//! teloxide messages; tests build them directly.

use serde::{Deserialize, Serialize};

/// Kind of chat a message was posted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInfo {
    pub id: i64,
    pub kind: ChatKind,
    pub title: String,
    pub description: String,
    pub username: String,
}

impl ChatInfo {
    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }
}

/// A chat member as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub is_bot: bool,
    pub language_code: Option<String>,
}

impl ChatMember {
    /// Key used for standuper records: the username, or the numeric id for
    /// accounts that have none
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => self.id.to_string(),
        }
    }

    /// How the bot addresses the member in chat
    pub fn mention(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => format!("@{}", username),
            _ => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: i64,
    pub chat: ChatInfo,
    pub text: String,
    pub from: Option<ChatMember>,
    pub left_member: Option<ChatMember>,
    pub new_members: Vec<ChatMember>,
}

impl InboundMessage {
    pub fn is_command(&self) -> bool {
        self.text.starts_with('/')
    }

    pub fn sent_by_bot(&self) -> bool {
        self.from.as_ref().map_or(false, |from| from.is_bot)
    }
}

/// An inbound event: a new message or an edit of an earlier one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundUpdate {
    pub message: Option<InboundMessage>,
    pub edited_message: Option<InboundMessage>,
}

impl InboundUpdate {
    pub fn new_message(message: InboundMessage) -> Self {
        Self { message: Some(message), edited_message: None }
    }

    pub fn edited(message: InboundMessage) -> Self {
        Self { message: None, edited_message: Some(message) }
    }

    /// The message the update is about, preferring a new message over an edit
    pub fn message(&self) -> Option<&InboundMessage> {
        self.message.as_ref().or(self.edited_message.as_ref())
    }
}

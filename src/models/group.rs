//! Group model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Deadline assigned to newly tracked groups
pub const DEFAULT_STANDUP_DEADLINE: &str = "10:00";
/// Timezone assigned to newly tracked groups and standupers
pub const DEFAULT_TIMEZONE: &str = "Asia/Bishkek";
/// Language assigned to newly tracked groups
pub const DEFAULT_GROUP_LANGUAGE: &str = "ru_RU";

/// A tracked team chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub chat_id: i64,
    pub title: String,
    pub username: String,
    pub description: String,
    pub standup_deadline: String,
    pub timezone: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub chat_id: i64,
    pub title: String,
    pub username: String,
    pub description: String,
    pub standup_deadline: String,
    pub timezone: String,
    pub language: String,
}

impl CreateGroupRequest {
    /// Request for a group with the default deadline, timezone and language
    pub fn with_defaults(chat_id: i64, title: &str, username: &str, description: &str) -> Self {
        Self {
            chat_id,
            title: title.to_string(),
            username: username.to_string(),
            description: description.to_string(),
            standup_deadline: DEFAULT_STANDUP_DEADLINE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            language: DEFAULT_GROUP_LANGUAGE.to_string(),
        }
    }
}

impl Group {
    /// Whether standups in this group have a daily deadline
    pub fn has_deadline(&self) -> bool {
        !self.standup_deadline.trim().is_empty()
    }
}

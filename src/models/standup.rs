//! Standup model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A standup report, unique per (message_id, chat_id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Standup {
    pub id: i64,
    pub message_id: i64,
    pub chat_id: i64,
    pub username: String,
    pub text: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStandupRequest {
    pub message_id: i64,
    pub chat_id: i64,
    pub username: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

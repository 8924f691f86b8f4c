//! Standuper model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A human chat member expected to post standups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Standuper {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub chat_id: i64,
    pub language_code: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStanduperRequest {
    pub user_id: i64,
    pub username: String,
    pub chat_id: i64,
    pub language_code: String,
    pub timezone: String,
}

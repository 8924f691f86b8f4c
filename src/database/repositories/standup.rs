//! Standup repository implementation

use sqlx::PgPool;
use crate::database::storage::Upserted;
use crate::models::standup::{Standup, CreateStandupRequest};
use crate::utils::errors::StandupBotError;

const STANDUP_COLUMNS: &str = "id, message_id, chat_id, username, text, created, modified";

#[derive(Clone)]
pub struct StandupRepository {
    pool: PgPool,
}

impl StandupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a standup unless one exists for the same message and chat
    pub async fn create(&self, request: CreateStandupRequest) -> Result<Upserted<Standup>, StandupBotError> {
        let inserted = sqlx::query_as::<_, Standup>(
            r#"
            INSERT INTO standups (message_id, chat_id, username, text, created, modified)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (message_id, chat_id) DO NOTHING
            RETURNING id, message_id, chat_id, username, text, created, modified
            "#
        )
        .bind(request.message_id)
        .bind(request.chat_id)
        .bind(&request.username)
        .bind(&request.text)
        .bind(request.created)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(standup) = inserted {
            return Ok(Upserted::Created(standup));
        }

        let existing = self.find_by_message(request.message_id, request.chat_id).await?
            .ok_or_else(|| StandupBotError::Storage(format!(
                "standup for message {} in chat {} vanished after insert conflict",
                request.message_id, request.chat_id
            )))?;

        Ok(Upserted::Existing(existing))
    }

    /// Find standup by message and chat
    pub async fn find_by_message(&self, message_id: i64, chat_id: i64) -> Result<Option<Standup>, StandupBotError> {
        let standup = sqlx::query_as::<_, Standup>(&format!(
            "SELECT {} FROM standups WHERE message_id = $1 AND chat_id = $2",
            STANDUP_COLUMNS
        ))
        .bind(message_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(standup)
    }

    /// Update the mutable fields of a standup
    pub async fn update(&self, standup: &Standup) -> Result<Standup, StandupBotError> {
        let standup = sqlx::query_as::<_, Standup>(
            r#"
            UPDATE standups
            SET username = $2,
                text = $3,
                modified = $4
            WHERE id = $1
            RETURNING id, message_id, chat_id, username, text, created, modified
            "#
        )
        .bind(standup.id)
        .bind(&standup.username)
        .bind(&standup.text)
        .bind(standup.modified)
        .fetch_one(&self.pool)
        .await?;

        Ok(standup)
    }
}

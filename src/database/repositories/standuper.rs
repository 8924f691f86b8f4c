//! Standuper repository implementation

use sqlx::PgPool;
use crate::database::storage::Upserted;
use crate::models::standuper::{Standuper, CreateStanduperRequest};
use crate::utils::errors::StandupBotError;

const STANDUPER_COLUMNS: &str = "id, user_id, username, chat_id, language_code, timezone";

#[derive(Clone)]
pub struct StanduperRepository {
    pool: PgPool,
}

impl StanduperRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a standuper unless the username is already registered in the chat
    pub async fn create(&self, request: CreateStanduperRequest) -> Result<Upserted<Standuper>, StandupBotError> {
        let inserted = sqlx::query_as::<_, Standuper>(
            r#"
            INSERT INTO standupers (user_id, username, chat_id, language_code, timezone)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username, chat_id) DO NOTHING
            RETURNING id, user_id, username, chat_id, language_code, timezone
            "#
        )
        .bind(request.user_id)
        .bind(&request.username)
        .bind(request.chat_id)
        .bind(&request.language_code)
        .bind(&request.timezone)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(standuper) = inserted {
            return Ok(Upserted::Created(standuper));
        }

        let existing = self.find(&request.username, request.chat_id).await?
            .ok_or_else(|| StandupBotError::Storage(format!(
                "standuper {} in chat {} vanished after insert conflict",
                request.username, request.chat_id
            )))?;

        Ok(Upserted::Existing(existing))
    }

    /// Find standuper by username within a chat
    pub async fn find(&self, username: &str, chat_id: i64) -> Result<Option<Standuper>, StandupBotError> {
        let standuper = sqlx::query_as::<_, Standuper>(&format!(
            "SELECT {} FROM standupers WHERE username = $1 AND chat_id = $2",
            STANDUPER_COLUMNS
        ))
        .bind(username)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(standuper)
    }

    /// Delete standuper
    pub async fn delete(&self, id: i64) -> Result<(), StandupBotError> {
        sqlx::query("DELETE FROM standupers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete every standuper of a chat
    pub async fn delete_for_chat(&self, chat_id: i64) -> Result<u64, StandupBotError> {
        let result = sqlx::query("DELETE FROM standupers WHERE chat_id = $1")
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

//! Group repository implementation

use sqlx::PgPool;
use crate::database::storage::Upserted;
use crate::models::group::{Group, CreateGroupRequest};
use crate::utils::errors::StandupBotError;

const GROUP_COLUMNS: &str = "id, chat_id, title, username, description, standup_deadline, timezone, language";

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a group unless one already tracks the chat
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Upserted<Group>, StandupBotError> {
        let inserted = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (chat_id, title, username, description, standup_deadline, timezone, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (chat_id) DO NOTHING
            RETURNING id, chat_id, title, username, description, standup_deadline, timezone, language
            "#
        )
        .bind(request.chat_id)
        .bind(&request.title)
        .bind(&request.username)
        .bind(&request.description)
        .bind(&request.standup_deadline)
        .bind(&request.timezone)
        .bind(&request.language)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(group) = inserted {
            return Ok(Upserted::Created(group));
        }

        let existing = self.find_by_chat_id(request.chat_id).await?
            .ok_or_else(|| StandupBotError::Storage(format!(
                "group for chat {} vanished after insert conflict",
                request.chat_id
            )))?;

        Ok(Upserted::Existing(existing))
    }

    /// Find group by Telegram chat ID
    pub async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<Group>, StandupBotError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups WHERE chat_id = $1",
            GROUP_COLUMNS
        ))
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Delete group
    pub async fn delete(&self, id: i64) -> Result<(), StandupBotError> {
        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all groups
    pub async fn list(&self) -> Result<Vec<Group>, StandupBotError> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups ORDER BY id ASC",
            GROUP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }
}

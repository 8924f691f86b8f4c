//! Database service layer
//!
//! This module provides a high-level interface to database operations and
//! implements [`Storage`] on top of the Postgres repositories.

use async_trait::async_trait;
use crate::database::{DatabasePool, StandupRepository, GroupRepository, StanduperRepository};
use crate::database::storage::{Storage, Upserted};
use crate::models::*;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct DatabaseService {
    pub standups: StandupRepository,
    pub groups: GroupRepository,
    pub standupers: StanduperRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            standups: StandupRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            standupers: StanduperRepository::new(pool),
        }
    }
}

#[async_trait]
impl Storage for DatabaseService {
    async fn find_standup_by_message(&self, message_id: i64, chat_id: i64) -> Result<Option<Standup>> {
        self.standups.find_by_message(message_id, chat_id).await
    }

    async fn create_standup(&self, request: CreateStandupRequest) -> Result<Upserted<Standup>> {
        self.standups.create(request).await
    }

    async fn update_standup(&self, standup: &Standup) -> Result<Standup> {
        self.standups.update(standup).await
    }

    async fn find_group(&self, chat_id: i64) -> Result<Option<Group>> {
        self.groups.find_by_chat_id(chat_id).await
    }

    async fn create_group(&self, request: CreateGroupRequest) -> Result<Upserted<Group>> {
        self.groups.create(request).await
    }

    async fn delete_group(&self, id: i64) -> Result<()> {
        self.groups.delete(id).await
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.groups.list().await
    }

    async fn find_standuper(&self, username: &str, chat_id: i64) -> Result<Option<Standuper>> {
        self.standupers.find(username, chat_id).await
    }

    async fn create_standuper(&self, request: CreateStanduperRequest) -> Result<Upserted<Standuper>> {
        self.standupers.create(request).await
    }

    async fn delete_standuper(&self, id: i64) -> Result<()> {
        self.standupers.delete(id).await
    }

    async fn delete_all_standupers_for_chat(&self, chat_id: i64) -> Result<()> {
        let removed = self.standupers.delete_for_chat(chat_id).await?;
        tracing::debug!(chat_id = chat_id, removed = removed, "Deleted standupers of chat");
        Ok(())
    }
}

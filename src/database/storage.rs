//! Storage abstraction
//!
//! Everything the bot persists goes through [`Storage`]. Lookups return
//! `Ok(None)` when nothing matches; that is ordinary control flow, not an
//! error. The `create_*` operations are atomic "insert if absent, else
//! fetch": two concurrent creates for the same key yield one row, and the
//! loser learns about it through [`Upserted::Existing`].

use async_trait::async_trait;
use crate::models::{Standup, CreateStandupRequest, Group, CreateGroupRequest, Standuper, CreateStanduperRequest};
use crate::utils::errors::Result;

/// Result of an insert-if-absent operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted<T> {
    /// The row did not exist and was inserted
    Created(T),
    /// A row with the same key already existed and was left untouched
    Existing(T),
}

impl<T> Upserted<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Upserted::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Upserted::Created(value) | Upserted::Existing(value) => value,
        }
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn find_standup_by_message(&self, message_id: i64, chat_id: i64) -> Result<Option<Standup>>;
    async fn create_standup(&self, request: CreateStandupRequest) -> Result<Upserted<Standup>>;
    /// Persist `text`, `username` and `modified` of an existing standup
    async fn update_standup(&self, standup: &Standup) -> Result<Standup>;

    async fn find_group(&self, chat_id: i64) -> Result<Option<Group>>;
    async fn create_group(&self, request: CreateGroupRequest) -> Result<Upserted<Group>>;
    async fn delete_group(&self, id: i64) -> Result<()>;
    async fn list_groups(&self) -> Result<Vec<Group>>;

    async fn find_standuper(&self, username: &str, chat_id: i64) -> Result<Option<Standuper>>;
    async fn create_standuper(&self, request: CreateStanduperRequest) -> Result<Upserted<Standuper>>;
    async fn delete_standuper(&self, id: i64) -> Result<()>;
    async fn delete_all_standupers_for_chat(&self, chat_id: i64) -> Result<()>;
}

//! In-process storage
//!
//! A [`Storage`] implementation backed by plain vectors. It keeps the same
//! uniqueness rules as the Postgres schema, records every operation it
//! serves and can be told to fail specific operations, which makes it the
//! storage of choice for tests and local dry runs.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use crate::database::storage::{Storage, Upserted};
use crate::models::*;
use crate::utils::errors::{StandupBotError, Result};

/// Storage operations, used for call logs and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOp {
    FindStandupByMessage,
    CreateStandup,
    UpdateStandup,
    FindGroup,
    CreateGroup,
    DeleteGroup,
    ListGroups,
    FindStanduper,
    CreateStanduper,
    DeleteStanduper,
    DeleteAllStandupersForChat,
}

impl StorageOp {
    /// Whether the operation changes stored data
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StorageOp::CreateStandup
                | StorageOp::UpdateStandup
                | StorageOp::CreateGroup
                | StorageOp::DeleteGroup
                | StorageOp::CreateStanduper
                | StorageOp::DeleteStanduper
                | StorageOp::DeleteAllStandupersForChat
        )
    }
}

#[derive(Debug, Default)]
struct Tables {
    standups: Vec<Standup>,
    groups: Vec<Group>,
    standupers: Vec<Standuper>,
    next_id: i64,
    calls: Vec<StorageOp>,
    failing: HashSet<StorageOp>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `op` fail with a storage error
    pub fn fail_on(&self, op: StorageOp) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.failing.insert(op);
        }
    }

    /// Stop failing `op`
    pub fn recover(&self, op: StorageOp) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.failing.remove(&op);
        }
    }

    pub fn standups(&self) -> Vec<Standup> {
        self.tables.lock().map(|t| t.standups.clone()).unwrap_or_default()
    }

    pub fn groups(&self) -> Vec<Group> {
        self.tables.lock().map(|t| t.groups.clone()).unwrap_or_default()
    }

    pub fn standupers(&self) -> Vec<Standuper> {
        self.tables.lock().map(|t| t.standupers.clone()).unwrap_or_default()
    }

    /// Every operation served so far, in call order
    pub fn calls(&self) -> Vec<StorageOp> {
        self.tables.lock().map(|t| t.calls.clone()).unwrap_or_default()
    }

    /// Lock the tables and account for `op`
    fn begin(&self, op: StorageOp) -> Result<MutexGuard<'_, Tables>> {
        let mut tables = self.tables.lock()
            .map_err(|_| StandupBotError::Storage("memory storage lock poisoned".to_string()))?;
        tables.calls.push(op);
        if tables.failing.contains(&op) {
            return Err(StandupBotError::Storage(format!("{:?} failed", op)));
        }
        Ok(tables)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn find_standup_by_message(&self, message_id: i64, chat_id: i64) -> Result<Option<Standup>> {
        let tables = self.begin(StorageOp::FindStandupByMessage)?;
        Ok(tables.standups.iter()
            .find(|s| s.message_id == message_id && s.chat_id == chat_id)
            .cloned())
    }

    async fn create_standup(&self, request: CreateStandupRequest) -> Result<Upserted<Standup>> {
        let mut tables = self.begin(StorageOp::CreateStandup)?;
        if let Some(existing) = tables.standups.iter()
            .find(|s| s.message_id == request.message_id && s.chat_id == request.chat_id)
        {
            return Ok(Upserted::Existing(existing.clone()));
        }

        let standup = Standup {
            id: tables.next_id(),
            message_id: request.message_id,
            chat_id: request.chat_id,
            username: request.username,
            text: request.text,
            created: request.created,
            modified: request.created,
        };
        tables.standups.push(standup.clone());
        Ok(Upserted::Created(standup))
    }

    async fn update_standup(&self, standup: &Standup) -> Result<Standup> {
        let mut tables = self.begin(StorageOp::UpdateStandup)?;
        let stored = tables.standups.iter_mut()
            .find(|s| s.id == standup.id)
            .ok_or_else(|| StandupBotError::Storage(format!("standup {} does not exist", standup.id)))?;

        stored.username = standup.username.clone();
        stored.text = standup.text.clone();
        stored.modified = standup.modified;
        Ok(stored.clone())
    }

    async fn find_group(&self, chat_id: i64) -> Result<Option<Group>> {
        let tables = self.begin(StorageOp::FindGroup)?;
        Ok(tables.groups.iter().find(|g| g.chat_id == chat_id).cloned())
    }

    async fn create_group(&self, request: CreateGroupRequest) -> Result<Upserted<Group>> {
        let mut tables = self.begin(StorageOp::CreateGroup)?;
        if let Some(existing) = tables.groups.iter().find(|g| g.chat_id == request.chat_id) {
            return Ok(Upserted::Existing(existing.clone()));
        }

        let group = Group {
            id: tables.next_id(),
            chat_id: request.chat_id,
            title: request.title,
            username: request.username,
            description: request.description,
            standup_deadline: request.standup_deadline,
            timezone: request.timezone,
            language: request.language,
        };
        tables.groups.push(group.clone());
        Ok(Upserted::Created(group))
    }

    async fn delete_group(&self, id: i64) -> Result<()> {
        let mut tables = self.begin(StorageOp::DeleteGroup)?;
        tables.groups.retain(|g| g.id != id);
        Ok(())
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let tables = self.begin(StorageOp::ListGroups)?;
        Ok(tables.groups.clone())
    }

    async fn find_standuper(&self, username: &str, chat_id: i64) -> Result<Option<Standuper>> {
        let tables = self.begin(StorageOp::FindStanduper)?;
        Ok(tables.standupers.iter()
            .find(|s| s.username == username && s.chat_id == chat_id)
            .cloned())
    }

    async fn create_standuper(&self, request: CreateStanduperRequest) -> Result<Upserted<Standuper>> {
        let mut tables = self.begin(StorageOp::CreateStanduper)?;
        if let Some(existing) = tables.standupers.iter()
            .find(|s| s.username == request.username && s.chat_id == request.chat_id)
        {
            return Ok(Upserted::Existing(existing.clone()));
        }

        let standuper = Standuper {
            id: tables.next_id(),
            user_id: request.user_id,
            username: request.username,
            chat_id: request.chat_id,
            language_code: request.language_code,
            timezone: request.timezone,
        };
        tables.standupers.push(standuper.clone());
        Ok(Upserted::Created(standuper))
    }

    async fn delete_standuper(&self, id: i64) -> Result<()> {
        let mut tables = self.begin(StorageOp::DeleteStanduper)?;
        tables.standupers.retain(|s| s.id != id);
        Ok(())
    }

    async fn delete_all_standupers_for_chat(&self, chat_id: i64) -> Result<()> {
        let mut tables = self.begin(StorageOp::DeleteAllStandupersForChat)?;
        tables.standupers.retain(|s| s.chat_id != chat_id);
        Ok(())
    }
}

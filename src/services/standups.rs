//! Standup lifecycle
//!
//! Turns a group message that mentions the bot into a persisted standup.
//! Posting the same message again (or editing it) updates the stored record
//! instead of creating a second one.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, instrument};
use crate::database::{Storage, Upserted};
use crate::models::{CreateStandupRequest, InboundMessage, Standup};
use crate::services::classifier;
use crate::utils::errors::Result;
use crate::utils::helpers::contains_mention;
use crate::utils::locks::KeyedLocks;
use crate::utils::logging::log_standup_event;

/// What happened to a message handed to [`StandupService::handle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandupOutcome {
    /// The message is not addressed to the bot
    Ignored,
    /// The message is addressed to the bot but is not a standup
    Rejected { errors: Vec<String> },
    Created { standup: Standup, advisories: Vec<String> },
    Updated { standup: Standup },
}

/// Creates and updates standup records
pub struct StandupService {
    storage: Arc<dyn Storage>,
    bot_username: String,
    /// Keyed by (message_id, chat_id)
    locks: KeyedLocks<(i64, i64)>,
}

impl StandupService {
    pub fn new(storage: Arc<dyn Storage>, bot_username: &str) -> Self {
        Self {
            storage,
            bot_username: bot_username.trim_start_matches('@').to_string(),
            locks: KeyedLocks::new(),
        }
    }

    /// Classify `message` and persist it when it is a standup
    ///
    /// Nothing is written for ignored or rejected messages. Storage errors
    /// are returned as-is so the caller never confirms a standup that was
    /// not saved.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = message.id))]
    pub async fn handle(&self, message: &InboundMessage) -> Result<StandupOutcome> {
        let Some(author) = message.from.as_ref() else {
            return Ok(StandupOutcome::Ignored);
        };

        if !contains_mention(&message.text, &self.bot_username) {
            debug!("Message does not mention the bot");
            return Ok(StandupOutcome::Ignored);
        }

        let classification = classifier::classify(&message.text);
        if !classification.is_standup {
            debug!(errors = classification.validation_errors.len(), "Message is not a standup");
            return Ok(StandupOutcome::Rejected { errors: classification.validation_errors });
        }

        let username = author.handle();
        let _guard = self.locks.acquire((message.id, message.chat.id)).await;

        if let Some(existing) = self.storage.find_standup_by_message(message.id, message.chat.id).await? {
            return self.update(existing, &username, &message.text).await;
        }

        let request = CreateStandupRequest {
            message_id: message.id,
            chat_id: message.chat.id,
            username: username.clone(),
            text: message.text.clone(),
            created: Utc::now(),
        };

        match self.storage.create_standup(request).await? {
            Upserted::Created(standup) => {
                log_standup_event(standup.chat_id, standup.message_id, "created", &standup.username);
                Ok(StandupOutcome::Created {
                    standup,
                    advisories: classification.advisory_notes,
                })
            }
            // Written by another instance between the lookup and the insert
            Upserted::Existing(existing) => self.update(existing, &username, &message.text).await,
        }
    }

    async fn update(&self, mut standup: Standup, username: &str, text: &str) -> Result<StandupOutcome> {
        standup.username = username.to_string();
        standup.text = text.to_string();
        standup.modified = Utc::now();

        let standup = self.storage.update_standup(&standup).await?;
        log_standup_event(standup.chat_id, standup.message_id, "updated", &standup.username);
        Ok(StandupOutcome::Updated { standup })
    }
}

//! Test doubles for outbound collaborators
//!
//! [`RecordingMessenger`] stands in for Telegram and keeps every message the
//! bot sends; [`FakePullRequestSource`] stands in for the GitHub API.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use standup_bot::services::{Messenger, PullRequestMetadata, PullRequestReference, PullRequestSource, SendOptions};
use standup_bot::{Result, StandupBotError};

/// A message the bot tried to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub options: SendOptions,
}

/// Messenger that records sends instead of delivering them
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<SentMessage>>,
    failing: AtomicBool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later send fail with a delivery error
    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StandupBotError::Delivery {
                chat_id,
                reason: "chat not reachable".to_string(),
            });
        }

        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            options,
        });
        Ok(())
    }
}

/// Pull request source serving canned metadata by pull request number
#[derive(Debug, Default)]
pub struct FakePullRequestSource {
    pulls: HashMap<u64, PullRequestMetadata>,
}

impl FakePullRequestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull(mut self, number: u64, metadata: PullRequestMetadata) -> Self {
        self.pulls.insert(number, metadata);
        self
    }
}

#[async_trait]
impl PullRequestSource for FakePullRequestSource {
    async fn fetch(&self, reference: &PullRequestReference) -> Result<PullRequestMetadata> {
        self.pulls
            .get(&reference.number)
            .cloned()
            .ok_or_else(|| StandupBotError::Github(format!("pull request {} not found", reference.url)))
    }
}

//! Services module
//!
//! This module contains business logic services

pub mod classifier;
pub mod github;
pub mod membership;
pub mod messenger;
pub mod pull_requests;
pub mod standups;
pub mod teams;

// Re-export commonly used services
pub use classifier::{classify, ClassificationResult, Section};
pub use github::{GithubClient, PullRequestMetadata, PullRequestSource};
pub use membership::{BotIdentity, JoinOutcome, LeaveOutcome, MemberJoin, MembershipService};
pub use messenger::{Messenger, SendOptions, TelegramMessenger};
pub use pull_requests::{PullRequestAnalyzer, PullRequestReference};
pub use standups::{StandupOutcome, StandupService};
pub use teams::{Team, TeamRegistry};

use std::sync::Arc;
use crate::config::Settings;
use crate::database::Storage;
use crate::i18n::I18n;

/// Service factory for creating and sharing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub standup_service: Arc<StandupService>,
    pub membership_service: Arc<MembershipService>,
    /// `None` when pull request review is switched off
    pub pull_request_analyzer: Option<Arc<PullRequestAnalyzer>>,
    pub messenger: Arc<dyn Messenger>,
    pub storage: Arc<dyn Storage>,
    pub i18n: Arc<I18n>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        identity: BotIdentity,
        storage: Arc<dyn Storage>,
        messenger: Arc<dyn Messenger>,
        teams: Arc<TeamRegistry>,
        i18n: Arc<I18n>,
        pull_requests: Option<Arc<dyn PullRequestSource>>,
    ) -> Self {
        let standup_service = StandupService::new(Arc::clone(&storage), &identity.username);
        let membership_service = MembershipService::new(
            Arc::clone(&storage),
            identity,
            teams,
            Arc::clone(&messenger),
            Arc::clone(&i18n),
            &settings.bot.onboarding_message,
        );
        let pull_request_analyzer = pull_requests
            .filter(|_| settings.features.pull_request_review)
            .map(|source| Arc::new(PullRequestAnalyzer::new(source, &settings.github)));

        Self {
            standup_service: Arc::new(standup_service),
            membership_service: Arc::new(membership_service),
            pull_request_analyzer,
            messenger,
            storage,
            i18n,
        }
    }

    pub fn identity(&self) -> &BotIdentity {
        self.membership_service.identity()
    }
}

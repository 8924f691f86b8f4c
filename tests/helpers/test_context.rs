//! Test context for unified test setup
//!
//! Wires the router and services to in-memory storage, a recording
//! messenger and the real translation files.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use standup_bot::config::{LocalePolicy, Settings};
use standup_bot::database::{MemoryStorage, Storage};
use standup_bot::i18n::I18n;
use standup_bot::models::{Group, InboundUpdate};
use standup_bot::services::{BotIdentity, PullRequestSource, ServiceFactory, TeamRegistry};
use standup_bot::{EventRouter, Result};

use super::messenger_mock::RecordingMessenger;
use super::test_data::{BOT_ID, BOT_USERNAME};

/// Unified test context that manages all test components
pub struct TestContext {
    pub settings: Settings,
    pub storage: Arc<MemoryStorage>,
    pub messenger: Arc<RecordingMessenger>,
    pub teams: Arc<TeamRegistry>,
    pub team_queue: Option<UnboundedReceiver<Group>>,
    pub i18n: Arc<I18n>,
    pub services: ServiceFactory,
    pub router: EventRouter,
}

/// Configuration for test context creation
pub struct TestConfig {
    pub onboarding_message: String,
    pub locale_policy: LocalePolicy,
    pub pull_requests: Option<Arc<dyn PullRequestSource>>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            onboarding_message: "\"Read the team wiki first\"".to_string(),
            locale_policy: LocalePolicy::Fixed,
            pull_requests: None,
        }
    }
}

impl TestContext {
    /// Create a new test context with all components initialized
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Self {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings.bot.onboarding_message = config.onboarding_message;
        settings.i18n.locale_policy = config.locale_policy;
        settings.i18n.translations_dir = translations_dir();
        settings.features.pull_request_review = config.pull_requests.is_some();

        let i18n = Arc::new(I18n::load(&settings.i18n).await.expect("translations load"));
        let storage = Arc::new(MemoryStorage::new());
        let messenger = Arc::new(RecordingMessenger::new());
        let (teams, team_queue) = TeamRegistry::new();

        let services = ServiceFactory::new(
            &settings,
            BotIdentity::new(BOT_ID, BOT_USERNAME),
            Arc::clone(&storage) as Arc<dyn Storage>,
            messenger.clone(),
            Arc::clone(&teams),
            Arc::clone(&i18n),
            config.pull_requests,
        );
        let router = EventRouter::new(services.clone(), &settings.i18n);

        Self {
            settings,
            storage,
            messenger,
            teams,
            team_queue: Some(team_queue),
            i18n,
            services,
            router,
        }
    }

    pub async fn dispatch(&self, update: InboundUpdate) -> Result<()> {
        self.router.handle_update(&update).await
    }

    /// Groups handed to the team queue since the last call
    pub fn queued_groups(&mut self) -> Vec<Group> {
        let mut groups = Vec::new();
        if let Some(queue) = self.team_queue.as_mut() {
            while let Ok(group) = queue.try_recv() {
                groups.push(group);
            }
        }
        groups
    }

    /// Hand the team queue to the registry's runner, as `main` does
    pub fn spawn_team_runner(&mut self) -> JoinHandle<()> {
        let queue = self.team_queue.take().expect("team runner already spawned");
        tokio::spawn(Arc::clone(&self.teams).run(queue))
    }

    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, &self.settings.i18n.locale, None)
    }
}

pub fn translations_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/translations").to_string()
}

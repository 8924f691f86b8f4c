//! Membership reconciliation
//!
//! Keeps groups and standupers in step with who is actually in a chat. The
//! bot joining a chat starts tracking it; the bot leaving drops the group
//! together with all of its standupers. Humans joining get a standuper
//! record and a welcome message, humans leaving lose the record.
//!
//! Everything that happens for one chat is serialized, so a join racing a
//! leave for the same chat cannot interleave its reads and writes.

use std::sync::Arc;
use tracing::{info, warn, debug, instrument};
use crate::database::{Storage, Upserted};
use crate::i18n::{I18n, TranslationParams};
use crate::models::{ChatInfo, ChatMember, CreateGroupRequest, CreateStanduperRequest, Group, DEFAULT_TIMEZONE};
use crate::services::messenger::{Messenger, SendOptions};
use crate::services::teams::TeamRegistry;
use crate::utils::errors::{StandupBotError, Result};
use crate::utils::helpers::strip_quotes;
use crate::utils::locks::KeyedLocks;
use crate::utils::logging::log_group_event;

/// Who the bot is on the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
}

impl BotIdentity {
    pub fn new(id: i64, username: &str) -> Self {
        Self {
            id,
            username: username.trim_start_matches('@').to_string(),
        }
    }

    /// Whether `member` is this bot, by id first and username second
    pub fn is_me(&self, member: &ChatMember) -> bool {
        if member.id == self.id {
            return true;
        }
        match member.username.as_deref() {
            Some(username) => !self.username.is_empty() && username.eq_ignore_ascii_case(&self.username),
            None => false,
        }
    }
}

/// Summary of a join event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The bot itself was among the new members
    pub bot_joined: bool,
    /// A group record was created while handling the event
    pub group_created: bool,
    /// Handles of the standupers created, in event order
    pub registered: Vec<String>,
    /// Handles of members that needed no record (bots, existing standupers)
    pub skipped: Vec<String>,
}

/// What happened to a single human member joining
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberJoin {
    Registered { group_created: bool },
    AlreadyPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The bot left; the group and its standupers are gone
    BotRemoved,
    StanduperRemoved { username: String },
    /// The member had no standuper record
    AlreadyAbsent,
}

/// Reconciles group and standuper records with join and leave events
pub struct MembershipService {
    storage: Arc<dyn Storage>,
    identity: BotIdentity,
    teams: Arc<TeamRegistry>,
    messenger: Arc<dyn Messenger>,
    i18n: Arc<I18n>,
    onboarding_message: String,
    locks: KeyedLocks<i64>,
}

impl MembershipService {
    pub fn new(
        storage: Arc<dyn Storage>,
        identity: BotIdentity,
        teams: Arc<TeamRegistry>,
        messenger: Arc<dyn Messenger>,
        i18n: Arc<I18n>,
        onboarding_message: &str,
    ) -> Self {
        Self {
            storage,
            identity,
            teams,
            messenger,
            i18n,
            onboarding_message: strip_quotes(onboarding_message).trim().to_string(),
            locks: KeyedLocks::new(),
        }
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    /// Handle members added to `chat`, in the order the platform reported them
    ///
    /// The bot joining ends processing of the event. A failed welcome does
    /// not stop the remaining members from being registered; the first such
    /// failure is returned once every member has been handled.
    #[instrument(skip(self, chat, members, locale), fields(chat_id = chat.id, members = members.len()))]
    pub async fn handle_join(&self, chat: &ChatInfo, members: &[ChatMember], locale: &str) -> Result<JoinOutcome> {
        let _guard = self.locks.acquire(chat.id).await;
        let mut outcome = JoinOutcome::default();
        let mut first_delivery_error = None;

        for member in members {
            if self.identity.is_me(member) {
                outcome.bot_joined = true;
                outcome.group_created |= self.welcome_bot(chat, locale).await?;
                break;
            }

            if member.is_bot {
                debug!(member = %member.handle(), "Skipping bot member");
                outcome.skipped.push(member.handle());
                continue;
            }

            match self.register(chat, member, locale).await {
                Ok(MemberJoin::Registered { group_created }) => {
                    outcome.group_created |= group_created;
                    outcome.registered.push(member.handle());
                }
                Ok(MemberJoin::AlreadyPresent) => outcome.skipped.push(member.handle()),
                Err(e @ StandupBotError::Delivery { .. }) => {
                    warn!(member = %member.handle(), error = %e, "Welcome message was not delivered");
                    // The standuper record was written before the send failed
                    outcome.registered.push(member.handle());
                    first_delivery_error.get_or_insert(e);
                }
                Err(e) => return Err(e),
            }
        }

        match first_delivery_error {
            Some(e) => Err(e),
            None => Ok(outcome),
        }
    }

    /// Register a single human member of `chat` as a standuper
    ///
    /// Used by join events and by the `/join` command.
    pub async fn join_member(&self, chat: &ChatInfo, member: &ChatMember, locale: &str) -> Result<MemberJoin> {
        let _guard = self.locks.acquire(chat.id).await;
        self.register(chat, member, locale).await
    }

    /// Handle `member` leaving `chat`
    #[instrument(skip(self, chat, member), fields(chat_id = chat.id, member = %member.handle()))]
    pub async fn handle_leave(&self, chat: &ChatInfo, member: &ChatMember) -> Result<LeaveOutcome> {
        let _guard = self.locks.acquire(chat.id).await;

        if self.identity.is_me(member) {
            return self.remove_bot(chat).await;
        }

        let username = member.handle();
        let Some(standuper) = self.storage.find_standuper(&username, chat.id).await? else {
            debug!("Leaving member was not a standuper");
            return Ok(LeaveOutcome::AlreadyAbsent);
        };

        self.storage.delete_standuper(standuper.id).await?;
        log_group_event(chat.id, "standuper_removed", Some(&username), None);
        Ok(LeaveOutcome::StanduperRemoved { username })
    }

    /// Make sure the chat is tracked and greet it; returns whether the
    /// group was created
    async fn welcome_bot(&self, chat: &ChatInfo, locale: &str) -> Result<bool> {
        let (_, created) = self.ensure_group(chat).await?;
        log_group_event(chat.id, "bot_joined", None, Some(&chat.title));

        let greeting = self.i18n.t("group.greeting", locale, None);
        self.messenger.send(chat.id, &greeting, SendOptions::default()).await?;
        Ok(created)
    }

    async fn register(&self, chat: &ChatInfo, member: &ChatMember, locale: &str) -> Result<MemberJoin> {
        let username = member.handle();
        if self.storage.find_standuper(&username, chat.id).await?.is_some() {
            debug!(member = %username, "Member is already a standuper");
            return Ok(MemberJoin::AlreadyPresent);
        }

        let request = CreateStanduperRequest {
            user_id: member.id,
            username: username.clone(),
            chat_id: chat.id,
            language_code: member.language_code.clone().unwrap_or_default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        };
        if let Upserted::Existing(_) = self.storage.create_standuper(request).await? {
            return Ok(MemberJoin::AlreadyPresent);
        }
        log_group_event(chat.id, "standuper_added", Some(&username), None);

        let (group, group_created) = self.ensure_group(chat).await?;

        let welcome = self.welcome_text(&group, chat, member, locale);
        self.messenger.send(chat.id, &welcome, SendOptions::default()).await?;
        Ok(MemberJoin::Registered { group_created })
    }

    /// Find or create the group for `chat`; a created group gets its team
    /// started before the chat lock is released
    async fn ensure_group(&self, chat: &ChatInfo) -> Result<(Group, bool)> {
        let request = CreateGroupRequest::with_defaults(chat.id, &chat.title, &chat.username, &chat.description);
        match self.storage.create_group(request).await? {
            Upserted::Created(group) => {
                info!(chat_id = chat.id, group_id = group.id, "Group created");
                self.teams.watch(group.clone())?;
                Ok((group, true))
            }
            Upserted::Existing(group) => Ok((group, false)),
        }
    }

    async fn remove_bot(&self, chat: &ChatInfo) -> Result<LeaveOutcome> {
        let team = self
            .teams
            .find_team(chat.id)
            .ok_or(StandupBotError::TeamNotFound { chat_id: chat.id })?;
        team.stop();

        self.storage.delete_all_standupers_for_chat(chat.id).await?;
        self.storage.delete_group(team.group.id).await?;
        self.teams.forget(chat.id);

        log_group_event(chat.id, "bot_removed", None, Some(&chat.title));
        Ok(LeaveOutcome::BotRemoved)
    }

    fn welcome_text(&self, group: &Group, chat: &ChatInfo, member: &ChatMember, locale: &str) -> String {
        let mut params = TranslationParams::new();
        params.insert("mention".to_string(), member.mention());
        params.insert("title".to_string(), chat.title.clone());
        params.insert("deadline".to_string(), group.standup_deadline.clone());

        let mut text = self.i18n.t("welcome.identity", locale, Some(&params));
        text.push('\n');
        if !self.onboarding_message.is_empty() {
            text.push_str(&self.onboarding_message);
            text.push_str("\n\n");
        }
        if group.has_deadline() {
            text.push_str(&self.i18n.t("welcome.deadline", locale, Some(&params)));
            text.push_str("\n\n");
        }
        text.push_str(&self.i18n.t("welcome.instructions", locale, None));
        text.push('\n');
        text.push_str(&self.i18n.t("welcome.closing", locale, None));
        text
    }
}

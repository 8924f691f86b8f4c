//! Event router
//!
//! Single entry point for inbound updates. Private chats get pull request
//! review and a standup check; group chats additionally get commands,
//! standup collection and membership reconciliation.

use tracing::{debug, warn, instrument};
use crate::config::{I18nConfig, LocalePolicy};
use crate::handlers::commands::{self, Command};
use crate::handlers::reply;
use crate::models::{InboundMessage, InboundUpdate};
use crate::services::{classify, PullRequestAnalyzer, SendOptions, ServiceFactory, StandupOutcome};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_reply};

#[derive(Clone)]
pub struct EventRouter {
    services: ServiceFactory,
    locale_policy: LocalePolicy,
    default_locale: String,
}

impl EventRouter {
    pub fn new(services: ServiceFactory, config: &I18nConfig) -> Self {
        Self {
            services,
            locale_policy: config.locale_policy,
            default_locale: config.locale.clone(),
        }
    }

    pub fn services(&self) -> &ServiceFactory {
        &self.services
    }

    /// Handle one inbound update; edits are handled like new messages
    pub async fn handle_update(&self, update: &InboundUpdate) -> Result<()> {
        match update.message() {
            Some(message) => self.handle_message(message).await,
            None => Ok(()),
        }
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = message.id))]
    async fn handle_message(&self, message: &InboundMessage) -> Result<()> {
        if message.chat.is_private() {
            return self.handle_private(message).await;
        }

        let locale = self.locale_for(message.chat.id).await;

        if let Some(member) = &message.left_member {
            let outcome = self.services.membership_service.handle_leave(&message.chat, member).await?;
            debug!(?outcome, "Member left");
            return Ok(());
        }

        if !message.new_members.is_empty() {
            let outcome = self.services
                .membership_service
                .handle_join(&message.chat, &message.new_members, &locale)
                .await?;
            debug!(?outcome, "Members joined");
            return Ok(());
        }

        if message.sent_by_bot() || message.text.is_empty() {
            return Ok(());
        }

        if let Some(analyzer) = &self.services.pull_request_analyzer {
            self.review_pull_requests(analyzer, message, &locale).await;
        }

        if message.is_command() {
            return match Command::from_text(&message.text, &self.services.identity().username) {
                Some(command) => commands::handle_command(&self.services, message, command, &locale).await,
                None => Ok(()),
            };
        }

        self.handle_standup(message, &locale).await
    }

    /// Review linked pull requests and check a standup sent in private
    async fn handle_private(&self, message: &InboundMessage) -> Result<()> {
        if message.sent_by_bot() || message.text.is_empty() {
            return Ok(());
        }

        let locale = self.default_locale.as_str();
        let i18n = &self.services.i18n;

        if let Some(analyzer) = &self.services.pull_request_analyzer {
            self.review_pull_requests(analyzer, message, locale).await;
        }

        if message.is_command() {
            return match Command::from_text(&message.text, &self.services.identity().username) {
                Some(command) => commands::handle_command(&self.services, message, command, locale).await,
                None => Ok(()),
            };
        }

        let classification = classify(&message.text);
        let text = if !classification.is_standup {
            with_lines(&i18n.t("private.not_standup", locale, None), &classification.validation_errors)
        } else if classification.advisory_notes.is_empty() {
            i18n.t("private.good_standup", locale, None)
        } else {
            with_lines(&i18n.t("private.advice", locale, None), &classification.advisory_notes)
        };

        reply(self.services.messenger.as_ref(), message, &text, "private_check").await
    }

    async fn handle_standup(&self, message: &InboundMessage, locale: &str) -> Result<()> {
        let i18n = &self.services.i18n;

        let text = match self.services.standup_service.handle(message).await? {
            StandupOutcome::Ignored => return Ok(()),
            StandupOutcome::Rejected { errors } => with_lines(&i18n.t("standup.rejected", locale, None), &errors),
            StandupOutcome::Created { advisories, .. } if advisories.is_empty() => {
                i18n.t("standup.accepted", locale, None)
            }
            StandupOutcome::Created { advisories, .. } => {
                with_lines(&i18n.t("standup.accepted_with_advice", locale, None), &advisories)
            }
            StandupOutcome::Updated { .. } => i18n.t("standup.updated", locale, None),
        };

        reply(self.services.messenger.as_ref(), message, &text, "standup").await
    }

    /// Reply once per pull request link in the message
    ///
    /// Review is best effort: failed lookups and failed replies are logged
    /// and never block standup handling.
    async fn review_pull_requests(&self, analyzer: &PullRequestAnalyzer, message: &InboundMessage, locale: &str) {
        let references = analyzer.find_references(&message.text);
        if references.is_empty() {
            return;
        }

        let i18n = &self.services.i18n;
        let options = SendOptions::reply_to(message.id).without_link_preview();

        for reference in analyzer.resolve(references).await {
            let warnings = analyzer.analyze(&reference);
            let url = reference.display_url();
            let text = if warnings.is_empty() {
                i18n.t_with("pull_request.good", locale, "url", url)
            } else {
                with_lines(&i18n.t_with("pull_request.needs_fixing", locale, "url", url), &warnings)
            };

            match self.services.messenger.send(message.chat.id, &text, options).await {
                Ok(()) => log_reply(message.chat.id, Some(message.id), "pull_request"),
                Err(e) => log_api_error("telegram", &e.to_string(), Some("pull request reply")),
            }
        }
    }

    /// Locale replies to `chat_id` are rendered in
    async fn locale_for(&self, chat_id: i64) -> String {
        if self.locale_policy == LocalePolicy::Fixed {
            return self.default_locale.clone();
        }

        match self.services.storage.find_group(chat_id).await {
            Ok(Some(group)) if self.services.i18n.is_locale_available(&group.language) => group.language,
            Ok(_) => self.default_locale.clone(),
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Could not look up group language");
                self.default_locale.clone()
            }
        }
    }
}

/// `header` followed by one line per item
fn with_lines(header: &str, lines: &[String]) -> String {
    let mut text = header.to_string();
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_lines() {
        let lines = vec!["- one".to_string(), "- two".to_string()];
        assert_eq!(with_lines("Header:", &lines), "Header:\n- one\n- two");
        assert_eq!(with_lines("Header:", &[]), "Header:");
    }
}

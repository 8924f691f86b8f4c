//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{StandupBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    if settings.features.pull_request_review {
        validate_github_config(&settings.github)?;
    }

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(StandupBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if let Some(username) = &config.username {
        if username.trim_start_matches('@').is_empty() {
            return Err(StandupBotError::Config(
                "Bot username override must not be empty".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StandupBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(StandupBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(StandupBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate GitHub configuration
fn validate_github_config(config: &super::GithubConfig) -> Result<()> {
    url::Url::parse(&config.api_url)?;

    if config.timeout_seconds == 0 {
        return Err(StandupBotError::Config(
            "GitHub timeout must be greater than 0".to_string()
        ));
    }

    if config.max_diff_lines == 0 || config.max_changed_files == 0 {
        return Err(StandupBotError::Config(
            "Pull request size limits must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.locale.is_empty() {
        return Err(StandupBotError::Config(
            "Locale is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.locale) {
        return Err(StandupBotError::Config(
            "Locale must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StandupBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:token".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let settings = Settings::default();
        assert_matches!(validate_settings(&settings), Err(StandupBotError::Config(_)));
    }

    #[test]
    fn test_locale_must_be_supported() {
        let mut settings = valid_settings();
        settings.i18n.locale = "de_DE".to_string();
        assert_matches!(validate_settings(&settings), Err(StandupBotError::Config(_)));
    }

    #[test]
    fn test_github_url_checked_only_when_review_enabled() {
        let mut settings = valid_settings();
        settings.github.api_url = "not a url".to_string();
        assert_matches!(validate_settings(&settings), Err(StandupBotError::UrlParse(_)));

        settings.features.pull_request_review = false;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "loud".to_string();
        assert_matches!(validate_settings(&settings), Err(StandupBotError::Config(_)));
    }
}

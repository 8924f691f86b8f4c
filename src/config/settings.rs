//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub i18n: I18nConfig,
    pub github: GithubConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Overrides the username reported by `getMe`
    pub username: Option<String>,
    /// Free text inserted into the welcome message for new standupers
    pub onboarding_message: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Which locale replies are rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalePolicy {
    /// Always use `I18nConfig::locale`
    Fixed,
    /// Use the group's configured language, falling back to `I18nConfig::locale`
    Group,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub locale: String,
    pub locale_policy: LocalePolicy,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// GitHub API configuration used for pull request review
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub max_diff_lines: u64,
    pub max_changed_files: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub pull_request_review: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Environment variables use the `STANDUP_BOT` prefix and `__` between
    /// nesting levels, e.g. `STANDUP_BOT__BOT__TOKEN`.
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("bot.onboarding_message", defaults.bot.onboarding_message)?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("database.min_connections", defaults.database.min_connections)?
            .set_default("i18n.locale", defaults.i18n.locale)?
            .set_default("i18n.locale_policy", "fixed")?
            .set_default("i18n.supported_languages", defaults.i18n.supported_languages)?
            .set_default("i18n.translations_dir", defaults.i18n.translations_dir)?
            .set_default("github.api_url", defaults.github.api_url)?
            .set_default("github.timeout_seconds", defaults.github.timeout_seconds)?
            .set_default("github.max_diff_lines", defaults.github.max_diff_lines)?
            .set_default("github.max_changed_files", defaults.github.max_changed_files)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.file_path", defaults.logging.file_path)?
            .set_default("features.pull_request_review", defaults.features.pull_request_review)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("STANDUP_BOT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StandupBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                username: None,
                onboarding_message: String::new(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/standup_bot".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            i18n: I18nConfig {
                locale: "en_US".to_string(),
                locale_policy: LocalePolicy::Fixed,
                supported_languages: vec!["en_US".to_string(), "ru_RU".to_string()],
                translations_dir: "translations".to_string(),
            },
            github: GithubConfig {
                api_url: "https://api.github.com".to_string(),
                token: None,
                timeout_seconds: 10,
                max_diff_lines: 500,
                max_changed_files: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
            features: FeaturesConfig {
                pull_request_review: true,
            },
        }
    }
}

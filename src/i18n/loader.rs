//! Translation loader and i18n management
//!
//! This module provides translation loading, locale fallback and message
//! formatting. Translation files are JSON objects named `{locale}.json`
//! with nested keys (`standup.accepted`) and `{param}` placeholders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, error, debug};
use crate::utils::errors::{StandupBotError, Result};
use crate::config::I18nConfig;

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by locale
    translations: HashMap<String, Map<String, Value>>,
    /// Locale used when a requested one is unavailable
    default_locale: String,
    supported_locales: Vec<String>,
    translations_dir: PathBuf,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_locale: config.locale.clone(),
            supported_locales: config.supported_languages.clone(),
            translations_dir: PathBuf::from(&config.translations_dir),
        }
    }

    /// Create and load in one step
    pub async fn load(config: &I18nConfig) -> Result<Self> {
        let mut i18n = Self::new(config);
        i18n.load_translations().await?;
        Ok(i18n)
    }

    /// Load all translation files from the translations directory
    ///
    /// A missing or broken file is only fatal for the default locale.
    pub async fn load_translations(&mut self) -> Result<()> {
        let supported_locales = self.supported_locales.clone();
        for locale in &supported_locales {
            let file_path = self.translations_dir.join(format!("{}.json", locale));

            if file_path.exists() {
                match self.load_locale_file(&file_path, locale).await {
                    Ok(_) => info!("Loaded translations for locale: {}", locale),
                    Err(e) => {
                        error!("Failed to load translations for {}: {}", locale, e);
                        if locale == &self.default_locale {
                            return Err(StandupBotError::Config(
                                format!("Failed to load default locale translations: {}", e)
                            ));
                        }
                    }
                }
            } else {
                warn!("Translation file not found: {}", file_path.display());
                if locale == &self.default_locale {
                    return Err(StandupBotError::Config(
                        format!("Default locale translation file not found: {}", file_path.display())
                    ));
                }
            }
        }

        Ok(())
    }

    /// Load a single locale file
    async fn load_locale_file(&mut self, file_path: &Path, locale: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        let translations: Value = serde_json::from_str(&content)?;

        let Value::Object(map) = translations else {
            return Err(StandupBotError::Config(
                format!("Invalid translation file format for {}", locale)
            ));
        };

        debug!("Loaded {} top-level translation keys for {}", map.len(), locale);
        self.translations.insert(locale.to_string(), map);
        Ok(())
    }

    /// Get a translated message
    ///
    /// Falls back to the default locale, then to the key itself.
    pub fn t(&self, key: &str, locale: &str, params: Option<&TranslationParams>) -> String {
        let effective_locale = self.effective_locale(locale);

        let translation = self.translation_value(key, effective_locale).or_else(|| {
            if effective_locale != self.default_locale {
                self.translation_value(key, &self.default_locale)
            } else {
                None
            }
        });

        match translation {
            Some(value) => format_message(&text_from_value(value), params),
            None => {
                warn!("Translation key '{}' not found", key);
                key.to_string()
            }
        }
    }

    /// Shorthand for [`I18n::t`] with a single parameter
    pub fn t_with(&self, key: &str, locale: &str, name: &str, value: &str) -> String {
        let mut params = TranslationParams::new();
        params.insert(name.to_string(), value.to_string());
        self.t(key, locale, Some(&params))
    }

    /// Check if a locale is supported and loaded
    pub fn is_locale_available(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|l| l == locale) && self.translations.contains_key(locale)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The requested locale if available, the default one otherwise
    fn effective_locale<'a>(&'a self, locale: &'a str) -> &'a str {
        if self.is_locale_available(locale) {
            locale
        } else {
            &self.default_locale
        }
    }

    /// Get translation value from nested JSON structure
    fn translation_value(&self, key: &str, locale: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.translations.get(locale)?.get(first)?;

        for part in parts {
            current = current.get(part)?;
        }

        Some(current)
    }
}

/// Extract text from a JSON value; arrays are joined line by line
fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text_from_value).collect::<Vec<_>>().join("\n"),
        Value::Object(obj) => obj.get("other").map(text_from_value).unwrap_or_default(),
        _ => value.to_string(),
    }
}

/// Format message with parameters
fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
    let Some(params) = params else {
        return template.to_string();
    };

    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

//! Internationalization module
//!
//! This module handles multi-language support for the standup bot.
//! It provides translation loading, locale fallback and message formatting.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};

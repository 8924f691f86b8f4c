//! Helper functions and utilities
//!
//! This module contains common text helpers used throughout the application.

/// Check whether `text` mentions `@handle`, ignoring case
///
/// Telegram usernames are case-insensitive, so `@StandupBot` and
/// `@standupbot` address the same account.
pub fn contains_mention(text: &str, handle: &str) -> bool {
    let handle = handle.trim_start_matches('@');
    if handle.is_empty() {
        return false;
    }
    let needle = format!("@{}", handle.to_lowercase());
    let haystack = text.to_lowercase();

    haystack.match_indices(&needle).any(|(start, _)| {
        // `@standupbot_test` is not a mention of `@standupbot`
        haystack[start + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}

/// Remove the double quotes configuration files tend to leave around free text
pub fn strip_quotes(text: &str) -> String {
    text.replace('"', "")
}

/// Count whitespace separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

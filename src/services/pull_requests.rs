//! Pull request review
//!
//! Finds GitHub pull request links in chat messages and checks each one
//! against a fixed checklist. Nothing here sends messages; the router turns
//! the findings into replies.

use std::sync::{Arc, OnceLock};
use futures::future::join_all;
use regex::Regex;
use tracing::warn;
use crate::config::GithubConfig;
use crate::services::github::{PullRequestMetadata, PullRequestSource};

/// Descriptions shorter than this count as missing
pub const MIN_DESCRIPTION_CHARS: usize = 20;

pub const WORK_IN_PROGRESS_WARNING: &str = "- the PR is still a draft / work in progress";
pub const MISSING_DESCRIPTION_WARNING: &str = "- the PR has no description, explain what changed and why";
pub const MISSING_ISSUE_WARNING: &str = "- the PR is not linked to an issue (use \"Closes #123\" or an issue link)";

/// A pull request link found in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestReference {
    pub url: String,
    pub owner: String,
    pub repo: String,
    pub number: u64,
    /// Filled in by [`PullRequestAnalyzer::resolve`]
    pub metadata: Option<PullRequestMetadata>,
}

impl PullRequestReference {
    pub fn new(url: &str, owner: &str, repo: &str, number: u64) -> Self {
        Self {
            url: url.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            metadata: None,
        }
    }

    /// Link used in replies, preferring the canonical one from the API
    pub fn display_url(&self) -> &str {
        self.metadata.as_ref().map_or(&self.url, |m| m.html_url.as_str())
    }
}

fn pull_request_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)https?://(?:www\.)?github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/pull/(\d+)")
            .expect("pull request pattern is valid")
    })
}

fn linked_issue_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:#\d+|/issues/\d+|\b(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+[\w./-]*#?\d+)")
            .expect("linked issue pattern is valid")
    })
}

/// Every pull request link in `text`, in order of appearance
///
/// Repeated links produce repeated entries.
pub fn find_references(text: &str) -> Vec<PullRequestReference> {
    pull_request_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps[3].parse::<u64>().ok()?;
            Some(PullRequestReference::new(&caps[0], &caps[1], &caps[2], number))
        })
        .collect()
}

/// Checks pull requests against the review checklist
#[derive(Clone)]
pub struct PullRequestAnalyzer {
    source: Arc<dyn PullRequestSource>,
    max_diff_lines: u64,
    max_changed_files: u64,
}

impl PullRequestAnalyzer {
    pub fn new(source: Arc<dyn PullRequestSource>, config: &GithubConfig) -> Self {
        Self {
            source,
            max_diff_lines: config.max_diff_lines,
            max_changed_files: config.max_changed_files,
        }
    }

    pub fn find_references(&self, text: &str) -> Vec<PullRequestReference> {
        find_references(text)
    }

    /// Attach metadata to each reference
    ///
    /// References whose metadata cannot be fetched are logged and dropped.
    pub async fn resolve(&self, references: Vec<PullRequestReference>) -> Vec<PullRequestReference> {
        let fetches = references.iter().map(|reference| self.source.fetch(reference));
        let results = join_all(fetches).await;

        references
            .into_iter()
            .zip(results)
            .filter_map(|(mut reference, result)| match result {
                Ok(metadata) => {
                    reference.metadata = Some(metadata);
                    Some(reference)
                }
                Err(e) => {
                    warn!(url = %reference.url, error = %e, "Could not fetch pull request");
                    None
                }
            })
            .collect()
    }

    /// Checklist findings for a reference; empty means the PR looks good
    pub fn analyze(&self, reference: &PullRequestReference) -> Vec<String> {
        let Some(metadata) = &reference.metadata else {
            return Vec::new();
        };

        let mut warnings = Vec::new();
        let body = metadata.body.as_deref().unwrap_or("").trim();

        if metadata.draft || metadata.title.trim_start().to_lowercase().starts_with("wip") {
            warnings.push(WORK_IN_PROGRESS_WARNING.to_string());
        }

        if body.chars().count() < MIN_DESCRIPTION_CHARS {
            warnings.push(MISSING_DESCRIPTION_WARNING.to_string());
        }

        let issue_linked = linked_issue_pattern().is_match(&metadata.title)
            || linked_issue_pattern().is_match(body);
        if !issue_linked {
            warnings.push(MISSING_ISSUE_WARNING.to_string());
        }

        let changed_lines = metadata.additions + metadata.deletions;
        if changed_lines > self.max_diff_lines {
            warnings.push(format!(
                "- the diff is too big: {} changed lines (limit {}), split the PR",
                changed_lines, self.max_diff_lines
            ));
        }

        if metadata.changed_files > self.max_changed_files {
            warnings.push(format!(
                "- too many files changed: {} (limit {})",
                metadata.changed_files, self.max_changed_files
            ));
        }

        warnings
    }
}

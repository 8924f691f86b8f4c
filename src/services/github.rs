//! GitHub API client
//!
//! Fetches pull request metadata for references found in chat messages.
//! Handles HTTP client setup, authentication, response parsing and error
//! mapping.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use crate::config::GithubConfig;
use crate::services::pull_requests::PullRequestReference;
use crate::utils::errors::{StandupBotError, Result};

/// Pull request fields the review checklist looks at
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequestMetadata {
    pub html_url: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changed_files: u64,
}

/// Anything that can look up pull request metadata
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn fetch(&self, reference: &PullRequestReference) -> Result<PullRequestMetadata>;
}

/// GitHub REST API client
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Create a new GithubClient instance
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("standup-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut api_url = Url::parse(&config.api_url)?;
        // Keep a trailing slash so `join` appends instead of replacing
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        Ok(Self {
            client,
            api_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn pull_url(&self, reference: &PullRequestReference) -> Result<Url> {
        let path = format!("repos/{}/{}/pulls/{}", reference.owner, reference.repo, reference.number);
        Ok(self.api_url.join(&path)?)
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    async fn fetch(&self, reference: &PullRequestReference) -> Result<PullRequestMetadata> {
        let url = self.pull_url(reference)?;
        debug!(url = %url, "Fetching pull request metadata");

        let mut request = self.client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StandupBotError::Github(format!("timeout fetching {}", reference.url))
            } else {
                StandupBotError::Http(e)
            }
        })?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<PullRequestMetadata>().await?),
            StatusCode::NOT_FOUND => Err(StandupBotError::Github(format!(
                "pull request {} not found or not accessible",
                reference.url
            ))),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StandupBotError::Github(format!("HTTP {}: {}", status, error_text)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_pull_url_respects_api_prefix() {
        let mut config = Settings::default().github;
        config.api_url = "https://git.example.com/api/v3".to_string();
        let client = GithubClient::new(&config).unwrap();

        let reference = PullRequestReference::new("https://github.com/acme/api/pull/7", "acme", "api", 7);
        assert_eq!(
            client.pull_url(&reference).unwrap().as_str(),
            "https://git.example.com/api/v3/repos/acme/api/pulls/7"
        );
    }

    #[test]
    fn test_metadata_tolerates_null_body() {
        let json = r#"{"html_url":"https://github.com/a/b/pull/1","title":"Fix","body":null,"draft":false,"additions":1,"deletions":2,"changed_files":1}"#;
        let metadata: PullRequestMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.body, None);
        assert_eq!(metadata.additions + metadata.deletions, 3);
    }
}

//! GitHub client tests against a mock API server

use assert_matches::assert_matches;
use serde_json::json;
use standup_bot::config::Settings;
use standup_bot::services::pull_requests::find_references;
use standup_bot::services::{GithubClient, PullRequestReference, PullRequestSource};
use standup_bot::StandupBotError;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer, token: Option<&str>) -> GithubClient {
    let mut config = Settings::default().github;
    config.api_url = server.uri();
    config.token = token.map(str::to_string);
    GithubClient::new(&config).unwrap()
}

fn reference() -> PullRequestReference {
    find_references("https://github.com/acme/api/pull/7").remove(0)
}

#[tokio::test]
async fn test_fetch_parses_pull_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/api/pulls/7"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html_url": "https://github.com/acme/api/pull/7",
            "title": "Speed up exports",
            "body": "Batches the export queries. Closes #12",
            "draft": false,
            "additions": 120,
            "deletions": 30,
            "changed_files": 4,
            "state": "open"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let metadata = client_for(&server, Some("secret")).fetch(&reference()).await.unwrap();

    assert_eq!(metadata.title, "Speed up exports");
    assert_eq!(metadata.additions, 120);
    assert_eq!(metadata.changed_files, 4);
    assert!(!metadata.draft);
}

#[tokio::test]
async fn test_missing_pull_request_is_a_github_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/api/pulls/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let result = client_for(&server, None).fetch(&reference()).await;

    assert_matches!(result, Err(StandupBotError::Github(ref msg)) if msg.contains("not found"));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = client_for(&server, None).fetch(&reference()).await;

    assert_matches!(result, Err(StandupBotError::Github(ref msg)) if msg.starts_with("HTTP 502"));
}

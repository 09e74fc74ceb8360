//! GitHub REST API record source.
//!
//! Blocking `ureq` calls, one request at a time. Issues map onto
//! [`Record`]s; the issue timeline supplies pin/unpin events.

use super::{RecordSource, RepoSlug, SourceError};
use crate::{
    log,
    record::{Record, RecordEvent},
};
use chrono::DateTime;
use serde::{Deserialize, de::DeserializeOwned};
use std::{collections::BTreeMap, time::Duration};

pub const API_ROOT: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct IssueJson {
    number: u64,
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelJson>,
    created_at: String,
    #[serde(default)]
    comments: u64,
    /// Present only when the "issue" is a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct LabelJson {
    name: String,
    #[serde(default)]
    color: String,
}

#[derive(Debug, Deserialize)]
struct EventJson {
    event: String,
}

impl IssueJson {
    fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    fn into_record(self, events: Vec<RecordEvent>) -> Result<Record, SourceError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|err| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "issue #{} has invalid created_at `{}`: {err}",
                        self.number, self.created_at
                    ),
                )
            })?
            .timestamp();

        Ok(Record {
            id: self.number,
            title: self.title,
            body: self.body,
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            created_at,
            comment_count: self.comments,
            events,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

/// Attach the headers every GitHub API call carries.
pub(crate) fn authorized(request: ureq::Request, token: &str) -> ureq::Request {
    request
        .set("Authorization", &format!("token {token}"))
        .set("Accept", "application/vnd.github+json")
        .set("User-Agent", concat!("issuepress/", env!("CARGO_PKG_VERSION")))
}

pub struct GithubSource {
    agent: ureq::Agent,
    token: String,
    repo: RepoSlug,
    api_root: String,
}

impl GithubSource {
    pub fn new(token: impl Into<String>, repo: RepoSlug) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(TIMEOUT).build(),
            token: token.into(),
            repo,
            api_root: API_ROOT.to_string(),
        }
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = authorized(self.agent.get(url), &self.token)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => SourceError::Status(code, url.to_string()),
                ureq::Error::Transport(e) => SourceError::Transport(e.to_string()),
            })?;
        Ok(response.into_json()?)
    }

    /// Follow `page=` until a short page comes back.
    fn get_paged<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, SourceError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        for page in 1.. {
            let batch: Vec<T> =
                self.get(&format!("{url}{separator}per_page={PER_PAGE}&page={page}"))?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
        }
        Ok(items)
    }

    fn repo_url(&self, tail: &str) -> String {
        format!("{}/repos/{}{tail}", self.api_root, self.repo)
    }

    fn events(&self, id: u64) -> Result<Vec<RecordEvent>, SourceError> {
        let events: Vec<EventJson> = self.get_paged(&self.repo_url(&format!("/issues/{id}/events")))?;
        Ok(events
            .iter()
            .map(|e| RecordEvent::from_name(&e.event))
            .collect())
    }
}

impl RecordSource for GithubSource {
    fn open_records(&self) -> Result<Vec<Record>, SourceError> {
        let issues: Vec<IssueJson> = self.get_paged(&self.repo_url("/issues?state=open"))?;
        log!("source"; "{} open issues in {}", issues.len(), self.repo);

        issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .map(|issue| {
                let events = self.events(issue.number)?;
                issue.into_record(events)
            })
            .collect()
    }

    fn record(&self, id: u64) -> Result<Record, SourceError> {
        let issue: IssueJson = match self.get(&self.repo_url(&format!("/issues/{id}"))) {
            Err(SourceError::Status(404, _)) => return Err(SourceError::NotFound(id)),
            other => other?,
        };
        if issue.is_pull_request() {
            return Err(SourceError::NotFound(id));
        }
        let events = self.events(id)?;
        issue.into_record(events)
    }

    fn label_colors(&self) -> Result<BTreeMap<String, String>, SourceError> {
        let labels: Vec<LabelJson> = self.get_paged(&self.repo_url("/labels"))?;
        Ok(labels
            .into_iter()
            .map(|label| (label.name, format!("#{}", label.color)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE: &str = r#"{
        "number": 12,
        "title": "Hello World",
        "body": "First post.",
        "labels": [{"name": "rust", "color": "dea584"}, {"name": "notes", "color": "ededed"}],
        "created_at": "2024-03-01T10:00:00Z",
        "comments": 4,
        "state": "open"
    }"#;

    #[test]
    fn test_issue_into_record() {
        let issue: IssueJson = serde_json::from_str(ISSUE).unwrap();
        assert!(!issue.is_pull_request());

        let record = issue.into_record(vec![RecordEvent::Pinned]).unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.title, "Hello World");
        assert_eq!(record.labels, vec!["rust", "notes"]);
        assert_eq!(record.created_at, 1_709_287_200);
        assert_eq!(record.comment_count, 4);
        assert!(record.pinned());
    }

    #[test]
    fn test_issue_null_body() {
        let issue: IssueJson = serde_json::from_str(
            r#"{"number": 1, "title": "t", "body": null, "labels": [], "created_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let record = issue.into_record(vec![]).unwrap();
        assert_eq!(record.body, None);
        assert_eq!(record.comment_count, 0);
    }

    #[test]
    fn test_pull_request_detected() {
        let issue: IssueJson = serde_json::from_str(
            r#"{"number": 2, "title": "pr", "created_at": "2024-01-01T00:00:00Z",
                "pull_request": {"url": "https://api.github.com/x"}}"#,
        )
        .unwrap();
        assert!(issue.is_pull_request());
    }

    #[test]
    fn test_invalid_created_at() {
        let issue: IssueJson = serde_json::from_str(
            r#"{"number": 3, "title": "t", "created_at": "yesterday"}"#,
        )
        .unwrap();
        assert!(issue.into_record(vec![]).is_err());
    }

    #[test]
    fn test_repo_url() {
        let source = GithubSource::new("t", RepoSlug::parse("alice/blog").unwrap());
        assert_eq!(
            source.repo_url("/labels"),
            "https://api.github.com/repos/alice/blog/labels"
        );
    }
}

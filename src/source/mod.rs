//! Where records come from.
//!
//! The pipeline only needs three queries: every open record, one record by
//! number, and the label color table. [`RecordSource`] is that seam;
//! [`github::GithubSource`] implements it against the GitHub REST API.

pub mod github;

use crate::record::Record;
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

/// Errors raised while talking to the record source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("issue tracker returned HTTP {0} for {1}")]
    Status(u16, String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode tracker response")]
    Decode(#[from] std::io::Error),

    #[error("invalid repository `{0}`, expected `owner/name`")]
    InvalidRepo(String),

    #[error("issue #{0} not found")]
    NotFound(u64),
}

/// Read access to the tracked records of one repository.
pub trait RecordSource {
    /// Every currently open record.
    fn open_records(&self) -> Result<Vec<Record>, SourceError>;

    /// A single record by number, open or not.
    fn record(&self, id: u64) -> Result<Record, SourceError>;

    /// Label name -> `#rrggbb` color.
    fn label_colors(&self) -> Result<BTreeMap<String, String>, SourceError>;
}

/// `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        match raw.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(SourceError::InvalidRepo(raw.to_string())),
        }
    }

    /// Web URL of a ticket.
    pub fn issue_url(&self, id: u64) -> String {
        format!("https://github.com/{self}/issues/{id}")
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

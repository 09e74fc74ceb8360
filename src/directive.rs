//! Per-record override blocks embedded in record bodies.
//!
//! A body may carry any number of `<!-- myconfig: {json} -->` comments.
//! They are applied in document order, later keys replacing earlier ones.
//! A block that fails to parse is reported and skipped.

use crate::{config::SiteConfig, log, record::Record};
use regex::Regex;
use serde::Deserialize;
use std::{collections::BTreeMap, sync::LazyLock};
use thiserror::Error;

static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--\s*myconfig:(.*?)-->").unwrap());

#[derive(Debug, Error)]
#[error("malformed myconfig block #{index}")]
pub struct DirectiveParseError {
    pub index: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Keys one directive block may set.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    pub style: Option<String>,
    pub script: Option<String>,
    pub og_image: Option<String>,
    pub created_at: Option<i64>,
    /// Older spelling of `createdAt`.
    pub timestamp: Option<i64>,
    /// Keys this program does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Per-record values after overrides met the site defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub style: String,
    pub script: String,
    pub og_image: String,
    pub created_at: i64,
}

impl Overrides {
    /// Parse every block in `body`. Malformed blocks come back as errors
    /// alongside the merged result of the well-formed ones.
    pub fn parse(body: &str) -> (Self, Vec<DirectiveParseError>) {
        let mut merged = Self::default();
        let mut errors = Vec::new();

        for (index, caps) in RE_DIRECTIVE.captures_iter(body).enumerate() {
            match serde_json::from_str::<Self>(caps[1].trim()) {
                Ok(block) => merged.merge(block),
                Err(source) => errors.push(DirectiveParseError { index, source }),
            }
        }

        (merged, errors)
    }

    /// Parse and log skipped blocks against `record`.
    pub fn extract(record: &Record) -> Self {
        let (overrides, errors) = Self::parse(record.body_text());
        for err in errors {
            log!("warn"; "issue #{}: {err}: {}, skipped", record.id, err.source);
        }
        overrides
    }

    fn merge(&mut self, later: Self) {
        let Self {
            style,
            script,
            og_image,
            created_at,
            timestamp,
            extra,
        } = later;

        if style.is_some() {
            self.style = style;
        }
        if script.is_some() {
            self.script = script;
        }
        if og_image.is_some() {
            self.og_image = og_image;
        }
        if created_at.is_some() || timestamp.is_some() {
            self.created_at = created_at.or(timestamp);
            self.timestamp = None;
        }
        self.extra.extend(extra);
    }

    /// Combine with site-wide defaults.
    ///
    /// Style and script are appended after the site fragments; the preview
    /// image and creation time replace the defaults outright.
    pub fn resolve(&self, config: &SiteConfig, record: &Record) -> Resolved {
        let append = |base: &str, extra: &Option<String>| match extra {
            Some(extra) => format!("{base}{extra}"),
            None => base.to_string(),
        };

        Resolved {
            style: append(&config.build.style, &self.style),
            script: append(&config.build.script, &self.script),
            og_image: self
                .og_image
                .clone()
                .unwrap_or_else(|| config.base.og_image().to_string()),
            created_at: self
                .created_at
                .or(self.timestamp)
                .unwrap_or(record.created_at),
        }
    }
}

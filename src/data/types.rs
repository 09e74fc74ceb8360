//! Data types persisted in the snapshot.

use crate::{
    classify::Placement,
    config::SiteConfig,
    directive::Resolved,
    record::Record,
    utils::date,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A record projected into site state.
///
/// Keyed by `"P" + id` in either the posts or the sub-pages collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntry {
    pub title: String,

    pub labels: Vec<String>,

    /// File stem of the page.
    pub slug: String,

    /// Root-relative output file (e.g. "docs/post/ni-hao.html")
    pub html_path: PathBuf,

    /// URL-quoted path relative to the output directory (e.g. "post/ni-hao.html")
    pub post_url: String,

    /// Absolute URL of the published page
    pub public_url: String,

    /// Link back to the source ticket
    pub source_url: String,

    pub comment_count: u64,

    pub word_count: u64,

    /// Body text up to and including the first sentence delimiter
    pub description: String,

    pub pinned: bool,

    /// Epoch seconds, after overrides
    pub created_at: i64,

    /// `YYYY-MM-DD` in the site's UTC offset
    pub created_date: String,

    pub date_label_color: String,

    /// Site style fragment followed by the record's own
    pub style: String,

    /// Site script fragment followed by the record's own
    pub script: String,

    pub og_image: String,
}

impl PostEntry {
    pub fn new(
        record: &Record,
        placement: Placement,
        resolved: Resolved,
        config: &SiteConfig,
        source_url: String,
    ) -> Self {
        let offset = config.base.utc_offset;
        let colors = &config.build.year_colors;
        let year = date::year(resolved.created_at, offset);
        let date_label_color = colors
            .get(year.rem_euclid(colors.len().max(1) as i32) as usize)
            .cloned()
            .unwrap_or_default();

        Self {
            title: record.title.clone(),
            labels: record.labels.clone(),
            public_url: format!(
                "{}/{}",
                config.base.home_url().trim_end_matches('/'),
                placement.post_url
            ),
            slug: placement.slug,
            html_path: placement.html_path,
            post_url: placement.post_url,
            source_url,
            comment_count: record.comment_count,
            word_count: record.word_count(),
            description: description(record.body.as_deref(), config.sentence_delimiter()),
            pinned: record.pinned(),
            created_at: resolved.created_at,
            created_date: date::created_date(resolved.created_at, offset),
            date_label_color,
            style: resolved.style,
            script: resolved.script,
            og_image: resolved.og_image,
        }
    }
}

/// Text before the first `delimiter`, with the delimiter re-attached.
///
/// An absent or blank body yields an empty description. A body without the
/// delimiter is kept whole, delimiter appended.
pub fn description(body: Option<&str>, delimiter: &str) -> String {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return String::new();
    };
    if delimiter.is_empty() {
        return body.to_string();
    }
    let first = body.split_once(delimiter).map_or(body, |(first, _)| first);
    format!("{first}{delimiter}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::Classifier,
        config::tests::test_config,
        directive::Overrides,
        record::{RecordEvent, tests::record},
    };

    #[test]
    fn test_description() {
        assert_eq!(description(Some("第一句。第二句。"), "。"), "第一句。");
        assert_eq!(description(Some("One. Two."), "."), "One.");
        assert_eq!(description(Some("No delimiter"), "."), "No delimiter.");
        assert_eq!(description(None, "."), "");
        assert_eq!(description(Some("  "), "."), "");
        assert_eq!(description(Some("a|b"), ""), "a|b");
    }

    #[test]
    fn test_new_entry() {
        let mut config = test_config();
        config.base.language = "EN".into();
        // 2024-03-01T10:00:00Z
        let mut r = record(5, "Hello World", &["rust", "notes"], 1_709_287_200);
        r.comment_count = 2;
        r.events = vec![RecordEvent::Pinned];

        let placement = Classifier::new(&config).classify(&r).unwrap();
        let resolved = Overrides::extract(&r).resolve(&config, &r);
        let entry = PostEntry::new(&r, placement, resolved, &config, "src".into());

        assert_eq!(entry.post_url, "post/Hello%20World.html");
        assert_eq!(
            entry.public_url,
            "https://alice.github.io/blog/post/Hello%20World.html"
        );
        assert_eq!(entry.description, "Body of Hello World.");
        assert_eq!(entry.comment_count, 2);
        assert_eq!(entry.word_count, r.word_count());
        assert!(entry.pinned);
        assert_eq!(entry.created_date, "2024-03-01");
        // 2024 % 4 == 0
        assert_eq!(entry.date_label_color, config.build.year_colors[0]);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let config = test_config();
        let r = record(1, "t", &["a"], 0);
        let placement = Classifier::new(&config).classify(&r).unwrap();
        let resolved = Overrides::extract(&r).resolve(&config, &r);
        let entry = PostEntry::new(&r, placement, resolved, &config, String::new());

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("htmlPath").is_some());
        assert!(json.get("dateLabelColor").is_some());
    }
}

//! rss feed generation.
//!
//! Sub-pages come first in stored order, then posts oldest first. The new
//! feed is compared with the previous one after stripping
//! `<lastBuildDate>`; when nothing else differs the previous text is kept,
//! build date included, so readers are not pinged for a no-op rebuild.

use crate::{
    data::{PostEntry, Snapshot},
    log,
    utils::date,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ImageBuilder, ItemBuilder, validation::Validate};
use std::{borrow::Cow, sync::LazyLock};

static RE_LAST_BUILD_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<lastBuildDate>.*?</lastBuildDate>").unwrap());

// ============================================================================
// Public API
// ============================================================================

/// Result of comparing a freshly built feed against the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Only the build date changed; the previous text is re-emitted.
    Unchanged(String),
    /// New content, or no previous feed.
    Updated(String),
}

impl FeedOutcome {
    pub fn into_xml(self) -> String {
        match self {
            Self::Unchanged(xml) | Self::Updated(xml) => xml,
        }
    }
}

/// Build the feed for `snapshot` and settle it against `previous`.
pub fn build_feed(snapshot: &Snapshot, previous: Option<&str>, now: DateTime<Utc>) -> FeedOutcome {
    let xml = FeedBuilder::new(snapshot).into_xml(now);
    settle(xml, previous)
}

/// Volatile fields stripped before comparison.
pub fn canonicalize(xml: &str) -> Cow<'_, str> {
    RE_LAST_BUILD_DATE.replace_all(xml, "")
}

fn settle(xml: String, previous: Option<&str>) -> FeedOutcome {
    match previous {
        Some(previous) if canonicalize(previous) == canonicalize(&xml) => {
            log!("rss"; "no update");
            FeedOutcome::Unchanged(previous.to_string())
        }
        _ => FeedOutcome::Updated(xml),
    }
}

// ============================================================================
// FeedBuilder
// ============================================================================

struct FeedBuilder<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> FeedBuilder<'a> {
    fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// Sub-pages as stored, then posts by `created_at` ascending.
    fn entries(&self) -> Vec<&'a PostEntry> {
        let mut posts: Vec<_> = self.snapshot.posts.values().collect();
        posts.sort_by_key(|entry| entry.created_at);
        self.snapshot.sub_pages.values().chain(posts).collect()
    }

    fn into_xml(self, now: DateTime<Utc>) -> String {
        let base = &self.snapshot.site.base;
        let home = base.home_url().to_string();

        let items: Vec<_> = self.entries().into_iter().map(entry_to_item).collect();

        let channel = ChannelBuilder::default()
            .title(base.title.clone())
            .link(home.clone())
            .description(base.sub_title.clone())
            .image(
                ImageBuilder::default()
                    .url(base.avatar_url.clone())
                    .title("avatar".to_string())
                    .link(home)
                    .build(),
            )
            .copyright(base.title.clone())
            .managing_editor(base.title.clone())
            .webmaster(base.title.clone())
            .ttl("60".to_string())
            .last_build_date(now.format(date::FEED_FORMAT).to_string())
            .generator(concat!("issuepress ", env!("CARGO_PKG_VERSION")).to_string())
            .items(items)
            .build();

        if let Err(e) = channel.validate() {
            log!("warn"; "rss validation: {e}");
        }
        channel.to_string()
    }
}

fn entry_to_item(entry: &PostEntry) -> rss::Item {
    ItemBuilder::default()
        .title(entry.title.clone())
        .link(entry.public_url.clone())
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.public_url.clone())
                .build(),
        )
        .description(entry.description.clone())
        .pub_date(date::feed_date(entry.created_at))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::RunMode,
        config::tests::test_config,
        data::{Collections, tests::entry},
    };
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn snapshot() -> Snapshot {
        let mut fresh = Collections::default();
        fresh.posts.insert("P1".into(), entry(1, "old post", &["x"], 1_000));
        fresh.posts.insert("P2".into(), entry(2, "new post", &["x"], 3_000));
        fresh.posts.insert("P3".into(), entry(3, "middle post", &["x"], 2_000));
        fresh.sub_pages.insert("P9".into(), entry(9, "about", &["about"], 5_000));
        Snapshot::reconcile(RunMode::Full, None, test_config(), BTreeMap::new(), fresh)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_item_order() {
        let snapshot = snapshot();
        let titles: Vec<_> = FeedBuilder::new(&snapshot)
            .entries()
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["about", "old post", "middle post", "new post"]);
    }

    #[test]
    fn test_channel_fields() {
        let xml = build_feed(&snapshot(), None, at(0)).into_xml();

        assert!(xml.contains("<title>Test Blog</title>"));
        assert!(xml.contains("<description>A test blog</description>"));
        assert!(xml.contains("<link>https://alice.github.io/blog</link>"));
        assert!(xml.contains("<ttl>60</ttl>"));
        assert!(xml.contains("<lastBuildDate>Thu, 01 Jan 1970 00:00:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<pubDate>Thu, 01 Jan 1970 00:16:40 +0000</pubDate>"));
        assert!(xml.contains("<guid"));
        assert!(xml.contains("https://alice.github.io/blog/post/"));
    }

    #[test]
    fn test_no_previous_feed_is_updated() {
        let outcome = build_feed(&snapshot(), None, at(10));
        assert!(matches!(outcome, FeedOutcome::Updated(_)));
    }

    #[test]
    fn test_only_build_date_changed_keeps_previous() {
        let snapshot = snapshot();
        let first = build_feed(&snapshot, None, at(10)).into_xml();
        let second = build_feed(&snapshot, Some(&first), at(99_999));

        assert_eq!(second, FeedOutcome::Unchanged(first.clone()));
        // Running again is byte-identical.
        let third = build_feed(&snapshot, Some(&second.into_xml()), at(123_456)).into_xml();
        assert_eq!(third, first);
    }

    #[test]
    fn test_content_change_is_updated() {
        let mut snapshot = snapshot();
        let first = build_feed(&snapshot, None, at(10)).into_xml();

        snapshot.posts.get_mut("P1").unwrap().title = "renamed".into();
        let second = build_feed(&snapshot, Some(&first), at(20));

        match second {
            FeedOutcome::Updated(xml) => assert!(xml.contains("renamed")),
            FeedOutcome::Unchanged(_) => panic!("title change must update the feed"),
        }
    }

    #[test]
    fn test_canonicalize() {
        let xml = "<rss><lastBuildDate>Mon, 01 Jan 2024</lastBuildDate><ttl>60</ttl></rss>";
        assert_eq!(canonicalize(xml), "<rss><ttl>60</ttl></rss>");
    }
}

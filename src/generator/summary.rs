//! Public post listing (`postList.json`).
//!
//! One entry per post, newest first, carrying only what a client-side
//! list needs. The label color table rides along under `labelColorInfo`.
//! Comment and word totals are accumulated for the README report.

use crate::data::{PostEntry, Snapshot};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

/// Key of the synthetic label color entry.
pub const LABEL_COLOR_KEY: &str = "labelColorInfo";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingItem<'a> {
    labels: &'a [String],
    post_title: &'a str,
    post_url: &'a str,
    created_date: &'a str,
    date_label_color: &'a str,
}

impl<'a> From<&'a PostEntry> for ListingItem<'a> {
    fn from(entry: &'a PostEntry) -> Self {
        Self {
            labels: &entry.labels,
            post_title: &entry.title,
            post_url: &entry.post_url,
            created_date: &entry.created_date,
            date_label_color: &entry.date_label_color,
        }
    }
}

#[derive(Debug)]
pub struct Summary<'a> {
    items: Vec<(&'a str, ListingItem<'a>)>,
    label_colors: &'a BTreeMap<String, String>,
    pub comment_total: u64,
    pub word_total: u64,
}

impl<'a> Summary<'a> {
    pub fn project(snapshot: &'a Snapshot) -> Self {
        let mut posts: Vec<_> = snapshot.posts.iter().collect();
        posts.sort_by(|(_, a), (_, b)| b.created_at.cmp(&a.created_at));

        let comment_total = posts.iter().map(|(_, e)| e.comment_count).sum();
        let word_total = posts.iter().map(|(_, e)| e.word_count).sum();

        Self {
            items: posts
                .into_iter()
                .map(|(key, entry)| (key.as_str(), ListingItem::from(entry)))
                .collect(),
            label_colors: &snapshot.label_colors,
            comment_total,
            word_total,
        }
    }

    pub fn post_count(&self) -> usize {
        self.items.len()
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}

/// Entries in listing order, then the label colors.
impl Serialize for Summary<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len() + 1))?;
        for (key, item) in &self.items {
            map.serialize_entry(key, item)?;
        }
        map.serialize_entry(LABEL_COLOR_KEY, self.label_colors)?;
        map.end()
    }
}

//! Listing pages.
//!
//! Posts are ordered by `(pinned, created_at)` descending and split into
//! pages of `page_size`. Page 0 is `index.html`, page `i` is
//! `page{i+1}.html`. Navigation links are root-relative (`/page2.html`)
//! with `"disabled"` marking a missing neighbour.

use crate::data::PostEntry;
use std::{collections::BTreeMap, path::PathBuf};

/// Navigation value for a missing neighbour.
pub const DISABLED: &str = "disabled";

/// One listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<'a> {
    pub index: usize,
    /// File name relative to the output directory.
    pub file: PathBuf,
    pub entries: &'a [&'a PostEntry],
    pub prev_url: String,
    pub next_url: String,
}

/// All listing pages of a run, plus the full ordering they were cut from.
#[derive(Debug, Clone)]
pub struct Pagination<'a> {
    /// Every post in listing order. Feeds the tag page.
    pub sorted: Vec<&'a PostEntry>,
    page_size: usize,
}

/// Posts in listing order: pinned first, then newest first.
///
/// Ties keep the collection's key order.
pub fn listing_order(posts: &BTreeMap<String, PostEntry>) -> Vec<&PostEntry> {
    let mut sorted: Vec<_> = posts.values().collect();
    sorted.sort_by(|a, b| (b.pinned, b.created_at).cmp(&(a.pinned, a.created_at)));
    sorted
}

pub fn page_file(index: usize) -> String {
    match index {
        0 => "index.html".to_string(),
        i => format!("page{}.html", i + 1),
    }
}

fn page_url(index: usize) -> String {
    format!("/{}", page_file(index))
}

impl<'a> Pagination<'a> {
    /// `page_size` must be at least 1; config validation guarantees it.
    pub fn new(posts: &'a BTreeMap<String, PostEntry>, page_size: usize) -> Self {
        Self {
            sorted: listing_order(posts),
            page_size: page_size.max(1),
        }
    }

    /// `ceil(posts / page_size)`, but never less than one.
    pub fn page_count(&self) -> usize {
        self.sorted.len().div_ceil(self.page_size).max(1)
    }

    pub fn pages(&self) -> Vec<ListPage<'_>> {
        let count = self.page_count();
        (0..count)
            .map(|index| {
                let start = (index * self.page_size).min(self.sorted.len());
                let end = ((index + 1) * self.page_size).min(self.sorted.len());

                ListPage {
                    index,
                    file: PathBuf::from(page_file(index)),
                    entries: &self.sorted[start..end],
                    prev_url: match index {
                        0 => DISABLED.to_string(),
                        i => page_url(i - 1),
                    },
                    next_url: if index + 1 < count {
                        page_url(index + 1)
                    } else {
                        DISABLED.to_string()
                    },
                }
            })
            .collect()
    }
}

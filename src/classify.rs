//! Routing records to a collection and naming their output file.
//!
//! A record whose first label is a configured sub-page label becomes a
//! standalone page named after that label, placed at the output root.
//! Everything else is a post under the post directory, named by the
//! configured [`UrlMode`](crate::config::UrlMode) strategy.

use crate::{config::SiteConfig, data::Snapshot, log, record::Record, utils::slug};
use std::{collections::HashMap, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Posts,
    SubPages,
}

/// Where a record's page goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub collection: Collection,
    pub slug: String,
    /// Root-relative output file, e.g. `docs/post/ni-hao.html`.
    pub html_path: PathBuf,
    /// URL-quoted path relative to the output directory.
    pub post_url: String,
}

pub struct Classifier<'a> {
    config: &'a SiteConfig,
    /// Output file -> key of the record that owns it.
    claimed: HashMap<PathBuf, String>,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            claimed: HashMap::new(),
        }
    }

    /// Treat every page of a previous run as already taken.
    pub fn seed(&mut self, snapshot: &Snapshot) {
        for (key, entry) in snapshot.posts.iter().chain(&snapshot.sub_pages) {
            self.claimed.insert(entry.html_path.clone(), key.clone());
        }
    }

    /// Place `record`, or `None` when it has no labels.
    ///
    /// A file name already owned by a different record gets `-<id>`
    /// appended, so callers should feed records in ascending id order.
    pub fn classify(&mut self, record: &Record) -> Option<Placement> {
        let label = record.primary_label()?;
        let collection = if self.config.build.is_sub_page_label(label) {
            Collection::SubPages
        } else {
            Collection::Posts
        };

        let stem = match collection {
            Collection::SubPages => slug::sanitize(label),
            Collection::Posts => slug::slugify(&record.title, record.id, self.config.build.url_mode),
        };

        let key = record.key();
        let mut placement = self.place(collection, stem.clone());
        if self
            .claimed
            .get(&placement.html_path)
            .is_some_and(|owner| *owner != key)
        {
            log!(
                "warn";
                "issue #{}: `{}` already taken, using `{stem}-{}`",
                record.id,
                placement.html_path.display(),
                record.id
            );
            placement = self.place(collection, format!("{stem}-{}", record.id));
        }

        self.claimed.insert(placement.html_path.clone(), key);
        Some(placement)
    }

    fn place(&self, collection: Collection, slug: String) -> Placement {
        let output = self.config.output_dir();
        let file = format!("{slug}.html");
        let html_path = match collection {
            Collection::Posts => self.config.post_dir().join(&file),
            Collection::SubPages => output.join(&file),
        };

        let relative = html_path.strip_prefix(output).unwrap_or(&html_path);
        let post_url = relative
            .iter()
            .map(|part| urlencoding::encode(&part.to_string_lossy()).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Placement {
            collection,
            slug,
            html_path,
            post_url,
        }
    }
}

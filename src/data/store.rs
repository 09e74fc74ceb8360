//! Persisted site state carried between runs.
//!
//! The snapshot holds the site configuration, the label color table and
//! both record collections. A full rebuild replaces the collections
//! wholesale; an incremental run merges the freshly computed entries into
//! the previous snapshot and leaves every other key untouched.

use super::types::PostEntry;
use crate::{classify::Collection, cli::RunMode, config::SiteConfig, utils::write::write_atomic};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("snapshot `{path}` is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Entries computed during the current run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub posts: BTreeMap<String, PostEntry>,
    pub sub_pages: BTreeMap<String, PostEntry>,
}

impl Collections {
    pub fn insert(&mut self, collection: Collection, key: String, entry: PostEntry) {
        match collection {
            Collection::Posts => self.posts.insert(key, entry),
            Collection::SubPages => self.sub_pages.insert(key, entry),
        };
    }

    pub fn len(&self) -> usize {
        self.posts.len() + self.sub_pages.len()
    }
}

/// On-disk state of the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub site: SiteConfig,

    /// Label name -> `#rrggbb`.
    #[serde(default)]
    pub label_colors: BTreeMap<String, String>,

    #[serde(default)]
    pub posts: BTreeMap<String, PostEntry>,

    #[serde(default)]
    pub sub_pages: BTreeMap<String, PostEntry>,
}

impl Snapshot {
    /// Load the previous run's snapshot. A missing file is `Ok(None)`.
    pub fn load_previous(path: &Path) -> Result<Option<Self>, SnapshotError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SnapshotError::Io(path.to_path_buf(), err)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| SnapshotError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Merge this run's entries with the previous state.
    ///
    /// `Full` (or no previous snapshot) keeps only `fresh`. `Single`
    /// starts from `previous` and overwrites just the keys in `fresh`; a key
    /// that moved between collections is removed from the one it left.
    pub fn reconcile(
        mode: RunMode,
        previous: Option<Snapshot>,
        site: SiteConfig,
        label_colors: BTreeMap<String, String>,
        fresh: Collections,
    ) -> Self {
        let (mut posts, mut sub_pages) = match (mode, previous) {
            (RunMode::Single(_), Some(previous)) => (previous.posts, previous.sub_pages),
            _ => (BTreeMap::new(), BTreeMap::new()),
        };

        for (key, entry) in fresh.posts {
            sub_pages.remove(&key);
            posts.insert(key, entry);
        }
        for (key, entry) in fresh.sub_pages {
            posts.remove(&key);
            sub_pages.insert(key, entry);
        }

        Self {
            site,
            label_colors,
            posts,
            sub_pages,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    /// Persist atomically; a crash never leaves a truncated snapshot.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let bytes = self.to_json().map_err(|source| SnapshotError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, &bytes).map_err(|err| SnapshotError::Io(path.to_path_buf(), err))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        classify::Classifier, config::tests::test_config, directive::Overrides,
        record::tests::record,
    };
    use tempfile::TempDir;

    pub(crate) fn entry(id: u64, title: &str, labels: &[&str], created_at: i64) -> PostEntry {
        let config = test_config();
        let r = record(id, title, labels, created_at);
        let placement = Classifier::new(&config).classify(&r).unwrap();
        let resolved = Overrides::extract(&r).resolve(&config, &r);
        PostEntry::new(&r, placement, resolved, &config, format!("src/{id}"))
    }

    fn collections(ids: &[u64]) -> Collections {
        let mut fresh = Collections::default();
        for &id in ids {
            fresh.insert(
                Collection::Posts,
                format!("P{id}"),
                entry(id, &format!("post {id}"), &["x"], id as i64),
            );
        }
        fresh
    }

    fn snapshot(ids: &[u64]) -> Snapshot {
        Snapshot::reconcile(
            RunMode::Full,
            None,
            test_config(),
            BTreeMap::new(),
            collections(ids),
        )
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = Snapshot::load_previous(&dir.path().join("snapshot.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{ not json").unwrap();

        let result = Snapshot::load_previous(&path);
        assert!(matches!(result, Err(SnapshotError::Corrupt { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        let saved = snapshot(&[1, 2]);
        saved.save(&path).unwrap();

        let loaded = Snapshot::load_previous(&path).unwrap().unwrap();
        assert_eq!(loaded.posts, saved.posts);
        assert_eq!(loaded.site.base.home_url(), saved.site.base.home_url());
        assert!(!dir.path().join("snapshot.json.tmp").exists());
    }

    #[test]
    fn test_full_rebuild_drops_closed_records() {
        let previous = snapshot(&[1, 2, 3]);
        let merged = Snapshot::reconcile(
            RunMode::Full,
            Some(previous),
            test_config(),
            BTreeMap::new(),
            collections(&[2, 4]),
        );
        assert_eq!(merged.posts.keys().collect::<Vec<_>>(), ["P2", "P4"]);
    }

    #[test]
    fn test_single_preserves_other_keys() {
        let previous = snapshot(&[1, 2, 3]);
        let before = previous.clone();

        let mut fresh = Collections::default();
        let mut changed = entry(2, "post 2 edited", &["x"], 99);
        changed.comment_count = 7;
        fresh.insert(Collection::Posts, "P2".into(), changed.clone());

        let merged = Snapshot::reconcile(
            RunMode::Single(2),
            Some(previous),
            test_config(),
            BTreeMap::new(),
            fresh,
        );

        assert_eq!(merged.posts.len(), 3);
        assert_eq!(merged.posts["P1"], before.posts["P1"]);
        assert_eq!(merged.posts["P3"], before.posts["P3"]);
        assert_eq!(merged.posts["P2"], changed);
    }

    #[test]
    fn test_single_moves_between_collections() {
        let previous = snapshot(&[1, 2]);
        let mut fresh = Collections::default();
        fresh.insert(
            Collection::SubPages,
            "P2".into(),
            entry(2, "About", &["about"], 0),
        );

        let merged = Snapshot::reconcile(
            RunMode::Single(2),
            Some(previous),
            test_config(),
            BTreeMap::new(),
            fresh,
        );

        assert!(!merged.posts.contains_key("P2"));
        assert!(merged.sub_pages.contains_key("P2"));
        assert!(merged.posts.contains_key("P1"));
    }

    #[test]
    fn test_single_without_previous_acts_as_full() {
        let merged = Snapshot::reconcile(
            RunMode::Single(5),
            None,
            test_config(),
            BTreeMap::new(),
            collections(&[5]),
        );
        assert_eq!(merged.posts.len(), 1);
    }

    #[test]
    fn test_collections_insert() {
        let mut fresh = Collections::default();
        assert_eq!(fresh.len(), 0);
        fresh.insert(Collection::SubPages, "P1".into(), entry(1, "a", &["x"], 0));
        fresh.insert(Collection::Posts, "P2".into(), entry(2, "b", &["x"], 0));
        assert_eq!(fresh.len(), 2);
        assert!(fresh.sub_pages.contains_key("P1"));
    }
}

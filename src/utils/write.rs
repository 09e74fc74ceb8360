//! Crash-safe file output.
//!
//! Every generated file is written to `<path>.tmp`, synced, then renamed
//! over the canonical name, so a reader never sees a truncated file.
//! [`Staging`] holds a whole run's output in memory until the pipeline has
//! finished, then commits it in one pass. The snapshot is saved by the
//! caller after the commit.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn fsync_dir(dir: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        fs::File::open(dir)?.sync_all()?;
    }
    #[cfg(not(unix))]
    let _ = dir;
    Ok(())
}

/// Write `bytes` to `path` via temp-file-then-rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new(""));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    fs::rename(&tmp, path)?;
    fsync_dir(parent)
}

// ============================================================================
// Staging
// ============================================================================

/// In-memory output of one run, keyed by root-relative path.
///
/// Adding the same path twice keeps the later content. A staged path is
/// never pruned or removed.
#[derive(Debug, Default)]
pub struct Staging {
    files: BTreeMap<PathBuf, Vec<u8>>,
    /// Directories whose unstaged files are removed at commit, optionally
    /// only those with the given extension.
    pruned: Vec<(PathBuf, Option<String>)>,
    removed: BTreeSet<PathBuf>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Remove files in `dir` that this run does not produce.
    pub fn prune_dir(&mut self, dir: impl Into<PathBuf>) {
        self.pruned.push((dir.into(), None));
    }

    /// Like [`prune_dir`](Self::prune_dir), limited to `*.{extension}`.
    pub fn prune_ext(&mut self, dir: impl Into<PathBuf>, extension: &str) {
        self.pruned.push((dir.into(), Some(extension.to_string())));
    }

    /// Delete `path` at commit unless it is staged by then.
    pub fn remove(&mut self, path: impl Into<PathBuf>) {
        self.removed.insert(path.into());
    }

    /// Number of staged files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Write everything below `root`. Returns the number of files written.
    pub fn commit(self, root: &Path) -> io::Result<usize> {
        let staged: BTreeSet<PathBuf> = self.files.keys().map(|p| root.join(p)).collect();
        for (dir, extension) in &self.pruned {
            prune(&root.join(dir), extension.as_deref(), &staged)?;
        }
        for path in self.removed.iter().map(|p| root.join(p)) {
            if staged.contains(&path) {
                continue;
            }
            match fs::remove_file(&path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
                _ => {}
            }
        }

        let mut written = 0;
        for (path, bytes) in &self.files {
            write_atomic(&root.join(path), bytes)?;
            written += 1;
        }
        Ok(written)
    }
}

fn prune(dir: &Path, extension: Option<&str>, keep: &BTreeSet<PathBuf>) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    for entry in entries {
        let path = entry?.path();
        let matches = extension.is_none_or(|ext| path.extension().is_some_and(|e| e == ext));
        if matches && path.is_file() && !keep.contains(&path) {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/file.html");
        write_atomic(&path, b"<p>hi</p>").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"<p>hi</p>");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        write_atomic(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(
            tmp_path(Path::new("docs/rss.xml")),
            PathBuf::from("docs/rss.xml.tmp")
        );
    }

    #[test]
    fn test_staging_later_add_wins() {
        let dir = TempDir::new().unwrap();
        let mut staging = Staging::new();
        staging.add("docs/post/a.html", "first");
        staging.add("docs/post/a.html", "second");
        assert_eq!(staging.len(), 1);

        staging.commit(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("docs/post/a.html")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_staging_commit() {
        let dir = TempDir::new().unwrap();
        let mut staging = Staging::new();
        staging.add("docs/index.html", "index");
        staging.add("docs/rss.xml", "<rss/>");
        assert_eq!(staging.len(), 2);

        assert_eq!(staging.commit(dir.path()).unwrap(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("docs/index.html")).unwrap(),
            "index"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("docs/rss.xml")).unwrap(),
            "<rss/>"
        );
    }

    #[test]
    fn test_staging_prunes_unstaged_files() {
        let dir = TempDir::new().unwrap();
        let post_dir = dir.path().join("docs/post");
        fs::create_dir_all(&post_dir).unwrap();
        fs::write(post_dir.join("closed.html"), "stale").unwrap();
        fs::write(post_dir.join("kept.html"), "old").unwrap();

        let mut staging = Staging::new();
        staging.add("docs/post/kept.html", "new");
        staging.prune_dir("docs/post");
        staging.commit(dir.path()).unwrap();

        assert!(!post_dir.join("closed.html").exists());
        assert_eq!(fs::read_to_string(post_dir.join("kept.html")).unwrap(), "new");
    }

    #[test]
    fn test_prune_ext_keeps_other_files() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("docs");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("page3.html"), "stale").unwrap();
        fs::write(output.join("CNAME"), "blog.example.com").unwrap();

        let mut staging = Staging::new();
        staging.add("docs/index.html", "index");
        staging.prune_ext("docs", "html");
        staging.commit(dir.path()).unwrap();

        assert!(!output.join("page3.html").exists());
        assert!(output.join("CNAME").exists());
        assert!(output.join("index.html").exists());
    }

    #[test]
    fn test_remove_skips_staged_and_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.html"), "old").unwrap();

        let mut staging = Staging::new();
        staging.remove("old.html");
        staging.remove("never-existed.html");
        staging.remove("new.html");
        staging.add("new.html", "new");
        staging.commit(dir.path()).unwrap();

        assert!(!dir.path().join("old.html").exists());
        assert_eq!(fs::read_to_string(dir.path().join("new.html")).unwrap(), "new");
    }

    #[test]
    fn test_prune_missing_dir() {
        let dir = TempDir::new().unwrap();
        let mut staging = Staging::new();
        staging.prune_dir("docs/post");
        assert_eq!(staging.commit(dir.path()).unwrap(), 0);
    }
}

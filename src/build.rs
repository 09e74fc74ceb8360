//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! Pipeline::run()
//!     │
//!     ├── load_previous()      snapshot.json, decides the effective mode
//!     │
//!     ├── process()            record ─► Placement ─► PostEntry + converted body
//!     │
//!     ├── Snapshot::reconcile  merge with the previous collections
//!     │
//!     ├── stage pages          post pages, listing pages, tag page
//!     ├── stage artifacts      rss.xml, postList.json, README.md
//!     │
//!     └── commit               every staged file, then the snapshot last
//! ```
//!
//! Nothing touches the disk before `commit`; a fatal error anywhere above it
//! leaves the previous run's output exactly as it was.

use crate::{
    classify::{Classifier, Collection},
    cli::RunMode,
    config::SiteConfig,
    data::{Collections, PostEntry, Snapshot, SnapshotError},
    directive::Overrides,
    generator::{
        pages::Pagination,
        readme,
        rss::{self, FeedOutcome},
        summary::Summary,
    },
    log,
    markup::{self, Converted, MATHJAX, MarkupConverter},
    record::Record,
    render::{Document, PostDocument, RendererFactory},
    source::{RecordSource, RepoSlug},
    utils::{minify::minify_html, slug, write::Staging},
};
use anyhow::{Context, Result};
use chrono::Utc;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Collaborators and settings of one run.
pub struct Pipeline<'a> {
    pub config: &'a SiteConfig,
    pub repo: &'a RepoSlug,
    pub source: &'a dyn RecordSource,
    pub converter: &'a dyn MarkupConverter,
    pub renderer: RendererFactory,
    /// Also write the README report.
    pub write_report: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub mode: RunMode,
    pub processed: usize,
    pub posts: usize,
    pub sub_pages: usize,
    pub files_written: usize,
    pub feed_updated: bool,
}

/// A record page waiting for the merged snapshot before it can render.
struct Processed {
    key: String,
    collection: Collection,
    converted: Converted,
}

impl Pipeline<'_> {
    pub fn run(&self, requested: RunMode) -> Result<BuildStats> {
        let config = self.config;
        let snapshot_path = config.at_root(&config.build.snapshot);

        let previous = load_previous(&snapshot_path, requested)?;
        let mode = match (requested, &previous) {
            (RunMode::Single(id), None) => {
                log!("snapshot"; "no previous snapshot, rebuilding everything instead of #{id}");
                RunMode::Full
            }
            _ => requested,
        };

        let label_colors = self
            .source
            .label_colors()
            .context("failed to fetch label colors")?;
        let mut records = match mode {
            RunMode::Full => self
                .source
                .open_records()
                .context("failed to fetch open issues")?,
            RunMode::Single(id) => vec![
                self.source
                    .record(id)
                    .with_context(|| format!("failed to fetch issue #{id}"))?,
            ],
        };
        records.sort_by_key(|record| record.id);
        log!("build"; "processing {} issue(s)", records.len());

        let mut classifier = Classifier::new(config);
        if let (RunMode::Single(_), Some(previous)) = (mode, &previous) {
            classifier.seed(previous);
        }

        let mut staging = Staging::new();
        let mut fresh = Collections::default();
        let mut processed = Vec::with_capacity(records.len());
        for record in &records {
            let Some((collection, entry, converted)) = self.process(record, &mut classifier)?
            else {
                continue;
            };
            if let (RunMode::Single(_), Some(previous)) = (mode, &previous) {
                for stale in superseded(previous, &record.key(), &entry, config) {
                    log!("build"; "#{} moved, removing `{}`", record.id, stale.display());
                    staging.remove(stale);
                }
            }
            staging.add(backup_path(config, &record.title), record.body_text());
            processed.push(Processed {
                key: record.key(),
                collection,
                converted,
            });
            fresh.insert(collection, record.key(), entry);
        }

        log!("build"; "{} of {} issue(s) placed", fresh.len(), records.len());

        let snapshot = Snapshot::reconcile(
            mode,
            previous,
            config.clone(),
            label_colors,
            fresh,
        );
        log!(
            "snapshot";
            "{} posts, {} sub-pages",
            snapshot.posts.len(),
            snapshot.sub_pages.len()
        );

        self.stage_pages(&snapshot, &processed, &mut staging);
        let feed_updated = self.stage_artifacts(&snapshot, &mut staging)?;

        if mode == RunMode::Full {
            staging.prune_dir(config.post_dir());
            staging.prune_ext(config.output_dir(), "html");
            staging.prune_ext(&config.build.backup, "md");
        }

        log!("build"; "committing {} file(s)", staging.len());
        let files_written = staging
            .commit(config.get_root())
            .context("failed to write output")?;
        snapshot
            .save(&snapshot_path)
            .context("failed to save snapshot")?;
        log!("build"; "done, {} files written", files_written + 1);

        Ok(BuildStats {
            mode,
            processed: processed.len(),
            posts: snapshot.posts.len(),
            sub_pages: snapshot.sub_pages.len(),
            files_written,
            feed_updated,
        })
    }

    /// Resolve, place and convert one record. `None` for records without labels.
    fn process(
        &self,
        record: &Record,
        classifier: &mut Classifier<'_>,
    ) -> Result<Option<(Collection, PostEntry, Converted)>> {
        let Some(placement) = classifier.classify(record) else {
            log!("warn"; "issue #{} has no labels, skipped", record.id);
            return Ok(None);
        };

        let resolved = Overrides::extract(record).resolve(self.config, record);
        let html = self
            .converter
            .convert(record.body_text())
            .with_context(|| format!("failed to convert issue #{}", record.id))?;
        let converted = markup::postprocess(html);

        let collection = placement.collection;
        let entry = PostEntry::new(
            record,
            placement,
            resolved,
            self.config,
            self.repo.issue_url(record.id),
        );
        log!("build"; "#{} -> {}", record.id, entry.html_path.display());
        Ok(Some((collection, entry, converted)))
    }

    fn stage_pages(&self, snapshot: &Snapshot, processed: &[Processed], staging: &mut Staging) {
        let config = self.config;
        let renderer = (self.renderer)(snapshot);
        let minify = |html: String| minify_html(&html, config.build.minify).into_owned();

        for item in processed {
            let entries = match item.collection {
                Collection::Posts => &snapshot.posts,
                Collection::SubPages => &snapshot.sub_pages,
            };
            let Some(entry) = entries.get(&item.key) else {
                continue;
            };

            let mut script = entry.script.clone();
            if item.converted.math {
                script.push_str(MATHJAX);
            }
            let document = Document::Post(PostDocument {
                entry,
                body_html: &item.converted.html,
                script,
                highlight: item.converted.highlight,
                sub_page: item.collection == Collection::SubPages,
            });
            staging.add(&entry.html_path, minify(renderer.render(&document)));
        }

        let pagination = Pagination::new(&snapshot.posts, config.build.page_size);
        let pages = pagination.pages();
        for page in &pages {
            let html = renderer.render(&Document::List(page));
            staging.add(config.output_dir().join(&page.file), minify(html));
        }
        log!("build"; "{} listing page(s)", pages.len());

        let tag = renderer.render(&Document::Tag(&pagination.sorted));
        staging.add(config.output_dir().join("tag.html"), minify(tag));
    }

    /// Stage feed, summary and report. Returns whether the feed changed.
    fn stage_artifacts(&self, snapshot: &Snapshot, staging: &mut Staging) -> Result<bool> {
        let config = self.config;

        let rss_path = config.rss_path();
        let previous_feed = read_optional(&config.at_root(&rss_path))
            .with_context(|| format!("failed to read `{}`", rss_path.display()))?;
        let outcome = rss::build_feed(snapshot, previous_feed.as_deref(), Utc::now());
        let feed_updated = matches!(outcome, FeedOutcome::Updated(_));
        staging.add(rss_path, outcome.into_xml());

        let summary = Summary::project(snapshot);
        staging.add(
            config.summary_path(),
            summary.to_json().context("failed to serialize summary")?,
        );
        if self.write_report {
            staging.add(&config.build.readme, readme::render_now(config, &summary));
        }
        log!(
            "build";
            "summary: {} posts, {} comments, {} words",
            summary.post_count(),
            summary.comment_total,
            summary.word_total
        );

        Ok(feed_updated)
    }
}

fn backup_path(config: &SiteConfig, title: &str) -> PathBuf {
    config
        .build
        .backup
        .join(format!("{}.md", slug::sanitize(title)))
}

/// Files of `key`'s previous entry that `entry` no longer writes and no
/// other record of `previous` uses.
fn superseded(
    previous: &Snapshot,
    key: &str,
    entry: &PostEntry,
    config: &SiteConfig,
) -> Vec<PathBuf> {
    let Some(old) = previous
        .posts
        .get(key)
        .or_else(|| previous.sub_pages.get(key))
    else {
        return Vec::new();
    };
    let others = || {
        previous
            .posts
            .iter()
            .chain(&previous.sub_pages)
            .filter(move |(other, _)| other.as_str() != key)
            .map(|(_, e)| e)
    };

    let mut stale = Vec::new();
    if old.html_path != entry.html_path && others().all(|e| e.html_path != old.html_path) {
        stale.push(old.html_path.clone());
    }
    let old_backup = backup_path(config, &old.title);
    if old_backup != backup_path(config, &entry.title)
        && others().all(|e| backup_path(config, &e.title) != old_backup)
    {
        stale.push(old_backup);
    }
    stale
}

/// Previous snapshot, if one can be used.
///
/// A corrupt snapshot aborts an incremental run, which has nothing to merge
/// into, but only costs a full rebuild otherwise.
fn load_previous(path: &Path, requested: RunMode) -> Result<Option<Snapshot>> {
    match Snapshot::load_previous(path) {
        Ok(snapshot) => Ok(snapshot),
        Err(err @ SnapshotError::Corrupt { .. }) if requested == RunMode::Full => {
            log!("warn"; "{:#}, ignoring it", anyhow::Error::from(err));
            Ok(None)
        }
        Err(err @ SnapshotError::Corrupt { .. }) => {
            Err(anyhow::Error::from(err).context("cannot merge a single issue"))
        }
        Err(err) => Err(err.into()),
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

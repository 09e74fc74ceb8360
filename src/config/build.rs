//! `[build]` section configuration.
//!
//! Output locations, pagination, slug strategy, and the site-wide
//! style/script fragments every page starts from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// How a post's file name is derived from its record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlMode {
    /// Numeric record id (e.g. `42.html`).
    Issue,
    /// Cyrillic title transliterated to Latin, spaces as hyphens.
    RuTranslit,
    /// Phonetic (pinyin) transliteration of the title (default).
    #[default]
    Pinyin,
}

/// Which backend turns record bodies into HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    /// GitHub's `/markdown` endpoint in gfm mode (default).
    #[default]
    Github,
    /// Local CommonMark conversion.
    Commonmark,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in issuepress.toml.
///
/// # Example
/// ```toml
/// [build]
/// output = "docs"
/// page_size = 10
/// url_mode = "issue"
/// sub_page_labels = ["about", "link"]
///
/// [build.rss]
/// path = "rss.xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Generated site directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Post pages directory, relative to `output`.
    #[serde(default = "defaults::build::post_dir")]
    #[educe(Default = defaults::build::post_dir())]
    pub post_dir: PathBuf,

    /// Raw markdown backups of every processed record.
    #[serde(default = "defaults::build::backup")]
    #[educe(Default = defaults::build::backup())]
    pub backup: PathBuf,

    /// Persisted state carried between runs.
    #[serde(default = "defaults::build::snapshot")]
    #[educe(Default = defaults::build::snapshot())]
    pub snapshot: PathBuf,

    /// Public post listing, relative to `output`.
    #[serde(default = "defaults::build::summary")]
    #[educe(Default = defaults::build::summary())]
    pub summary: PathBuf,

    /// Summary report written after each run.
    #[serde(default = "defaults::build::readme")]
    #[educe(Default = defaults::build::readme())]
    pub readme: PathBuf,

    /// Posts per listing page.
    #[serde(default = "defaults::build::page_size")]
    #[educe(Default = defaults::build::page_size())]
    pub page_size: usize,

    /// File naming strategy for posts.
    #[serde(default)]
    pub url_mode: UrlMode,

    /// First-label values that route a record to a standalone sub-page.
    #[serde(default)]
    pub sub_page_labels: Vec<String>,

    /// `"sentence"` or a literal delimiter ending the feed description.
    #[serde(default = "defaults::build::rss_split")]
    #[educe(Default = defaults::build::rss_split())]
    pub rss_split: String,

    /// Date badge palette, indexed by `year % len`.
    #[serde(default = "defaults::build::year_colors")]
    #[educe(Default = defaults::build::year_colors())]
    pub year_colors: Vec<String>,

    /// Site-wide `<style>` fragment, or a path to an `.html` file holding it.
    #[serde(default)]
    pub style: String,

    /// Site-wide `<script>` fragment, or a path to an `.html` file holding it.
    #[serde(default)]
    pub script: String,

    /// Minify generated HTML.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Markup conversion backend.
    #[serde(default)]
    pub markup: MarkupKind,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,
}

/// `[build.rss]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Feed path, relative to `output`.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}

impl BuildConfig {
    /// Whether `label` routes a record into the sub-page collection.
    pub fn is_sub_page_label(&self, label: &str) -> bool {
        self.sub_page_labels.iter().any(|l| l == label)
    }
}

//! `[base]` section configuration.
//!
//! Site identity: title, subtitle, avatar and the URLs derived from them.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in issuepress.toml - site identity.
///
/// `title`, `sub_title` and `avatar_url` have no defaults and must be
/// supplied by the user. The optional URL/title fields are filled in by
/// [`SiteConfig::resolve_derived`](super::SiteConfig::resolve_derived).
///
/// # Example
/// ```toml
/// [base]
/// title = "Alice's Notes"
/// sub_title = "Things I write down"
/// avatar_url = "https://example.com/avatar.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, also used as feed copyright/editor.
    pub title: String,

    /// One-line site description, used as the feed description.
    pub sub_title: String,

    /// Avatar image URL.
    pub avatar_url: String,

    /// Title shown in page headers. Defaults to `title`.
    #[serde(default)]
    pub display_title: Option<String>,

    /// Favicon URL. Defaults to `avatar_url`.
    #[serde(default)]
    pub favicon_url: Option<String>,

    /// Default Open Graph preview image. Defaults to `avatar_url`.
    #[serde(default)]
    pub og_image: Option<String>,

    /// Public site URL. Defaults to the repository's GitHub Pages URL.
    #[serde(default)]
    pub home_url: Option<String>,

    /// Interface language code ("CN", "EN", ...).
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Hours east of UTC used for displayed dates.
    #[serde(default = "defaults::base::utc_offset")]
    #[educe(Default = defaults::base::utc_offset())]
    pub utc_offset: i32,
}

impl BaseConfig {
    pub fn display_title(&self) -> &str {
        self.display_title.as_deref().unwrap_or(&self.title)
    }

    pub fn favicon_url(&self) -> &str {
        self.favicon_url.as_deref().unwrap_or(&self.avatar_url)
    }

    pub fn og_image(&self) -> &str {
        self.og_image.as_deref().unwrap_or(&self.avatar_url)
    }

    pub fn home_url(&self) -> &str {
        self.home_url.as_deref().unwrap_or_default()
    }
}

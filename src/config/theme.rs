//! `[theme]` section configuration.
//!
//! Presentation values passed through to the page renderer untouched.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `[theme]` section in issuepress.toml.
///
/// # Example
/// ```toml
/// [theme]
/// mode = "fix"
/// bottom_text = "Hosted on GitHub Pages"
///
/// [theme.links]
/// Friends = "https://example.org"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme switching mode ("manual" or "fix").
    #[serde(default = "defaults::theme::mode")]
    #[educe(Default = defaults::theme::mode())]
    pub mode: String,

    #[serde(default = "defaults::theme::day")]
    #[educe(Default = defaults::theme::day())]
    pub day: String,

    #[serde(default = "defaults::theme::night")]
    #[educe(Default = defaults::theme::night())]
    pub night: String,

    /// Badge color for comment counts.
    #[serde(default = "defaults::theme::comment_label_color")]
    #[educe(Default = defaults::theme::comment_label_color())]
    pub comment_label_color: String,

    /// Footer HTML for posts (not shown on sub-pages).
    #[serde(default)]
    pub bottom_text: String,

    /// Link each post back to its source ticket.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub show_post_source: bool,

    /// Site start date shown in the footer, e.g. "2024-01-01".
    #[serde(default)]
    pub start_site: String,

    /// Registration/filing number shown in the footer.
    #[serde(default)]
    pub filing_num: String,

    /// Svg path data drawn before the header link of the same name.
    #[serde(default)]
    pub icons: BTreeMap<String, String>,

    /// Extra header links: name -> URL.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

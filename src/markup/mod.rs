//! Record body to HTML conversion.
//!
//! Two backends implement [`MarkupConverter`]: GitHub's markdown endpoint
//! and an offline CommonMark renderer. Whatever comes back is passed
//! through [`postprocess`] before it reaches a page.

mod commonmark;
mod github;

pub use commonmark::CommonmarkConverter;
pub use github::GithubConverter;

use crate::config::MarkupKind;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static RE_MATH_RENDERER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<math-renderer.*?>|</math-renderer>").unwrap());

/// Loader appended to the script of posts containing math.
pub const MATHJAX: &str = concat!(
    r#"<script>MathJax = {tex: {inlineMath: [["$", "$"]]}};</script>"#,
    r#"<script async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>"#,
);

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("markdown endpoint returned HTTP {0}")]
    Status(u16),

    #[error("markdown endpoint unreachable: {0}")]
    Transport(String),
}

/// `(raw text) -> HTML`.
pub trait MarkupConverter {
    fn convert(&self, text: &str) -> Result<String, ConversionError>;
}

/// Pick the backend configured by `build.markup`.
pub fn converter(kind: MarkupKind, token: &str) -> Box<dyn MarkupConverter> {
    match kind {
        MarkupKind::Github => Box::new(GithubConverter::new(token)),
        MarkupKind::Commonmark => Box::new(CommonmarkConverter::new()),
    }
}

/// Converted body plus what the page template needs to know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub html: String,
    /// Math was present; the page needs [`MATHJAX`].
    pub math: bool,
    /// Syntax-highlight markup was present.
    pub highlight: bool,
}

/// Strip `<math-renderer>` wrappers and detect highlight markup.
pub fn postprocess(html: String) -> Converted {
    let math = html.contains("<math-renderer");
    let html = if math {
        RE_MATH_RENDERER.replace_all(&html, "").into_owned()
    } else {
        html
    };
    let highlight = html.contains("highlight");
    Converted {
        html,
        math,
        highlight,
    }
}

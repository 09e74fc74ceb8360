//! Page rendering.
//!
//! The pipeline hands finished data structures to a [`PageRenderer`]; it
//! never builds markup itself. [`html::HtmlRenderer`] is the maud-based
//! implementation.

pub mod html;

use crate::{
    data::{PostEntry, Snapshot},
    generator::pages::ListPage,
};

/// A record page. Sub-pages use the same document without the footer text.
#[derive(Debug, Clone)]
pub struct PostDocument<'a> {
    pub entry: &'a PostEntry,
    /// Converted, post-processed body.
    pub body_html: &'a str,
    /// Entry script plus any loader the body needs.
    pub script: String,
    pub highlight: bool,
    pub sub_page: bool,
}

#[derive(Debug, Clone)]
pub enum Document<'a> {
    Post(PostDocument<'a>),
    /// One page of the paginated listing.
    List(&'a ListPage<'a>),
    /// Every post, for the tag/search page.
    Tag(&'a [&'a PostEntry]),
}

impl Document<'_> {
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::List(_) => "plist",
            Self::Tag(_) => "tag",
        }
    }
}

pub trait PageRenderer {
    fn render(&self, document: &Document<'_>) -> String;
}

/// Builds the renderer for a run once its snapshot is merged.
pub type RendererFactory = for<'s> fn(&'s Snapshot) -> Box<dyn PageRenderer + 's>;

/// Interface strings for one language.
#[derive(Debug)]
pub struct I18n {
    pub home: &'static str,
    pub tags: &'static str,
    pub all: &'static str,
    pub prev: &'static str,
    pub next: &'static str,
    pub comments: &'static str,
    pub source: &'static str,
    pub pinned: &'static str,
    pub site_start: &'static str,
    pub search: &'static str,
}

const CN: I18n = I18n {
    home: "首页",
    tags: "标签",
    all: "全部",
    prev: "上一页",
    next: "下一页",
    comments: "评论",
    source: "原文",
    pinned: "置顶",
    site_start: "网站运行",
    search: "搜索",
};

const EN: I18n = I18n {
    home: "Home",
    tags: "Tags",
    all: "All",
    prev: "Previous",
    next: "Next",
    comments: "comments",
    source: "Source",
    pinned: "Pinned",
    site_start: "Online since",
    search: "Search",
};

/// Strings for `language`; unknown codes get English.
pub fn i18n(language: &str) -> &'static I18n {
    match language {
        "CN" => &CN,
        _ => &EN,
    }
}

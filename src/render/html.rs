//! maud templates for post, listing and tag pages.

use super::{Document, I18n, PageRenderer, PostDocument, i18n};
use crate::{
    config::SiteConfig,
    data::{PostEntry, Snapshot},
    generator::pages::{DISABLED, ListPage},
};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const BASE_CSS: &str = "\
body{max-width:900px;margin:0 auto;padding:16px;font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",sans-serif;line-height:1.6}\
header.site-header{display:flex;align-items:center;gap:12px;border-bottom:1px solid #d0d7de;padding-bottom:12px}\
header.site-header img.avatar{width:48px;height:48px;border-radius:50%}\
nav.site-nav{margin-left:auto;display:flex;gap:10px;flex-wrap:wrap}\
ul.post-list{list-style:none;padding:0}\
ul.post-list li{display:flex;align-items:center;gap:8px;padding:6px 0;border-bottom:1px solid #eaeef2}\
.label,.date-label,.comment-label{font-size:12px;padding:0 7px;border-radius:2em;color:#fff}\
.post-title{flex:1}\
nav.pagination{display:flex;justify-content:space-between;margin:16px 0}\
nav.pagination .disabled{color:#8c959f}\
footer.site-footer{margin-top:32px;font-size:13px;color:#57606a;text-align:center}\
";

/// Filters the tag page by the label in the URL fragment.
const TAG_JS: &str = "\
function filterLabel(){var l=decodeURIComponent(location.hash.slice(1));\
document.querySelectorAll('li[data-labels]').forEach(function(li){\
li.style.display=!l||JSON.parse(li.dataset.labels).indexOf(l)>=0?'':'none';});}\
window.addEventListener('hashchange',filterLabel);filterLabel();";

/// [`RendererFactory`](super::RendererFactory) for [`HtmlRenderer`].
pub fn boxed(snapshot: &Snapshot) -> Box<dyn PageRenderer + '_> {
    Box::new(HtmlRenderer::new(snapshot))
}

/// Renders pages for the site described by a snapshot.
pub struct HtmlRenderer<'a> {
    snapshot: &'a Snapshot,
    i18n: &'static I18n,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            i18n: i18n(&snapshot.site.base.language),
        }
    }

    fn config(&self) -> &'a SiteConfig {
        &self.snapshot.site
    }

    /// Absolute URL for a path relative to the site root.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config().base.home_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn label_color(&self, label: &str) -> &'a str {
        self.snapshot
            .label_colors
            .get(label)
            .map(String::as_str)
            .unwrap_or("#6e7781")
    }

    // ========================================================================
    // Shared components
    // ========================================================================

    fn document(
        &self,
        template: &str,
        head: Markup,
        style: &str,
        body: Markup,
        script: &str,
    ) -> Markup {
        let config = self.config();
        let theme = &config.theme;
        let lang = if config.base.language == "CN" { "zh-CN" } else { "en" };

        html! {
            (DOCTYPE)
            html lang=(lang) data-theme-mode=(theme.mode) data-light-theme=(theme.day) data-dark-theme=(theme.night) {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width,initial-scale=1.0";
                    link rel="icon" href=(config.base.favicon_url());
                    link rel="alternate" type="application/rss+xml" title=(config.base.title)
                        href=(self.url(&config.build.rss.path.to_string_lossy()));
                    (head)
                    style { (PreEscaped(BASE_CSS)) }
                    (PreEscaped(style))
                }
                body class={ "page-" (template) } {
                    (body)
                    (self.footer())
                    (PreEscaped(script))
                }
            }
        }
    }

    fn header(&self, title: &str, subtitle: Option<&str>) -> Markup {
        let config = self.config();
        html! {
            header.site-header {
                a href=(self.url("index.html")) {
                    img.avatar src=(config.base.avatar_url) alt="avatar";
                }
                div {
                    h1 { (title) }
                    @if let Some(subtitle) = subtitle {
                        p.subtitle { (subtitle) }
                    }
                }
                nav.site-nav {
                    a href=(self.url("index.html")) { (self.i18n.home) }
                    a href=(self.url("tag.html")) { (self.i18n.tags) }
                    @for entry in self.snapshot.sub_pages.values() {
                        a href=(self.url(&entry.post_url)) { (entry.title) }
                    }
                    @for (name, link) in &config.theme.links {
                        a href=(link) target="_blank" rel="noopener" {
                            @if let Some(icon) = config.theme.icons.get(name) {
                                svg.icon viewBox="0 0 16 16" width="16" height="16" {
                                    path d=(icon);
                                }
                            }
                            (name)
                        }
                    }
                    a href=(self.url(&config.build.rss.path.to_string_lossy())) { "RSS" }
                }
            }
        }
    }

    fn footer(&self) -> Markup {
        let theme = &self.config().theme;
        html! {
            footer.site-footer {
                @if !theme.start_site.is_empty() {
                    span.site-start data-start=(theme.start_site) {
                        (self.i18n.site_start) " " (theme.start_site)
                    }
                }
                @if !theme.filing_num.is_empty() {
                    " · " span.filing { (theme.filing_num) }
                }
                p { "Powered by issuepress" }
            }
        }
    }

    fn entry_row(&self, entry: &PostEntry) -> Markup {
        let config = self.config();
        html! {
            @if entry.pinned {
                span.pinned { (self.i18n.pinned) }
            }
            a.post-title href=(self.url(&entry.post_url)) { (entry.title) }
            @if entry.comment_count > 0 {
                span.comment-label style={ "background-color:" (config.theme.comment_label_color) } {
                    (entry.comment_count)
                }
            }
            @for label in &entry.labels {
                a.label href={ (self.url("tag.html")) "#" (label) }
                    style={ "background-color:" (self.label_color(label)) } { (label) }
            }
            span.date-label style={ "background-color:" (entry.date_label_color) } {
                (entry.created_date)
            }
        }
    }

    // ========================================================================
    // Pages
    // ========================================================================

    fn post(&self, template: &str, doc: &PostDocument<'_>) -> Markup {
        let config = self.config();
        let entry = doc.entry;

        let head = html! {
            title { (entry.title) " | " (config.base.display_title()) }
            meta name="description" content=(entry.description);
            meta property="og:title" content=(entry.title);
            meta property="og:description" content=(entry.description);
            meta property="og:type" content="article";
            meta property="og:url" content=(entry.public_url);
            meta property="og:image" content=(entry.og_image);
        };

        let body = html! {
            (self.header(&entry.title, None))
            main {
                article.markdown-body.highlight[doc.highlight] {
                    (PreEscaped(doc.body_html))
                }
                @if !doc.sub_page {
                    div.post-meta {
                        span.date-label style={ "background-color:" (entry.date_label_color) } {
                            (entry.created_date)
                        }
                        " "
                        span { (entry.comment_count) " " (self.i18n.comments) }
                        @if config.theme.show_post_source {
                            " "
                            a href=(entry.source_url) { (self.i18n.source) }
                        }
                    }
                    div.bottom-text { (PreEscaped(&config.theme.bottom_text)) }
                }
            }
        };

        self.document(template, head, &entry.style, body, &doc.script)
    }

    fn list(&self, template: &str, page: &ListPage<'_>) -> Markup {
        let config = self.config();
        let nav_link = |url: &str, text: &str| -> Markup {
            html! {
                @if url == DISABLED {
                    span.disabled { (text) }
                } @else {
                    a href=(self.url(url)) { (text) }
                }
            }
        };

        let head = html! {
            title { (config.base.display_title()) }
            meta name="description" content=(config.base.sub_title);
            meta property="og:title" content=(config.base.display_title());
            meta property="og:description" content=(config.base.sub_title);
            meta property="og:type" content="website";
            meta property="og:url" content=(self.url(&page.file.to_string_lossy()));
            meta property="og:image" content=(config.base.og_image());
        };

        let body = html! {
            (self.header(config.base.display_title(), Some(&config.base.sub_title)))
            main data-page=(page.index + 1) {
                ul.post-list {
                    @for entry in page.entries {
                        li { (self.entry_row(entry)) }
                    }
                }
                nav.pagination {
                    (nav_link(&page.prev_url, self.i18n.prev))
                    (nav_link(&page.next_url, self.i18n.next))
                }
            }
        };

        self.document(template, head, &config.build.style, body, &config.build.script)
    }

    fn tag(&self, template: &str, posts: &[&PostEntry]) -> Markup {
        let config = self.config();
        let mut labels: Vec<&str> = posts
            .iter()
            .flat_map(|entry| entry.labels.iter().map(String::as_str))
            .collect();
        labels.sort_unstable();
        labels.dedup();

        let head = html! {
            title { (self.i18n.tags) " | " (config.base.display_title()) }
            meta name="description" content=(config.base.sub_title);
        };

        let body = html! {
            (self.header(config.base.display_title(), Some(self.i18n.search)))
            main {
                nav.tag-filter {
                    a.label href="#" style="background-color:#6e7781" { (self.i18n.all) }
                    @for label in &labels {
                        a.label href={ "#" (label) } style={ "background-color:" (self.label_color(label)) } {
                            (label)
                        }
                    }
                }
                ul.post-list {
                    @for entry in posts {
                        li data-labels=(serde_json::to_string(&entry.labels).unwrap_or_default()) {
                            (self.entry_row(entry))
                        }
                    }
                }
            }
        };

        let script = format!("{}<script>{TAG_JS}</script>", config.build.script);
        self.document(template, head, &config.build.style, body, &script)
    }
}

impl PageRenderer for HtmlRenderer<'_> {
    fn render(&self, document: &Document<'_>) -> String {
        let template = document.template_name();
        let markup = match document {
            Document::Post(doc) => self.post(template, doc),
            Document::List(page) => self.list(template, page),
            Document::Tag(posts) => self.tag(template, posts),
        };
        markup.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::RunMode,
        config::tests::test_config,
        data::{Collections, tests::entry},
        generator::pages::Pagination,
    };
    use std::collections::BTreeMap;

    fn snapshot() -> Snapshot {
        let mut fresh = Collections::default();
        for id in 1..=3 {
            fresh.posts.insert(
                format!("P{id}"),
                entry(id, &format!("Post {id}"), &["rust"], id as i64 * 1000),
            );
        }
        let mut about = entry(9, "About", &["about"], 0);
        about.post_url = "about.html".into();
        fresh.sub_pages.insert("P9".into(), about);

        let colors = BTreeMap::from([("rust".to_string(), "#dea584".to_string())]);
        Snapshot::reconcile(RunMode::Full, None, test_config(), colors, fresh)
    }

    #[test]
    fn test_post_page() {
        let mut snapshot = snapshot();
        snapshot.site.theme.bottom_text = "<i>bye</i>".into();
        let renderer = HtmlRenderer::new(&snapshot);
        let entry = &snapshot.posts["P1"];

        let html = renderer.render(&Document::Post(PostDocument {
            entry,
            body_html: "<p>Hello <b>there</b></p>",
            script: "<script>x()</script>".into(),
            highlight: true,
            sub_page: false,
        }));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Post 1 | Test Blog</title>"));
        assert!(html.contains("<p>Hello <b>there</b></p>"));
        assert!(html.contains("<script>x()</script>"));
        assert!(html.contains("markdown-body highlight"));
        assert!(html.contains("<i>bye</i>"));
        assert!(html.contains(r#"href="https://alice.github.io/blog/about.html""#));
    }

    #[test]
    fn test_sub_page_has_no_bottom_text() {
        let mut snapshot = snapshot();
        snapshot.site.theme.bottom_text = "<i>bye</i>".into();
        let renderer = HtmlRenderer::new(&snapshot);

        let html = renderer.render(&Document::Post(PostDocument {
            entry: &snapshot.sub_pages["P9"],
            body_html: "<p>me</p>",
            script: String::new(),
            highlight: false,
            sub_page: true,
        }));

        assert!(!html.contains("<i>bye</i>"));
        assert!(!html.contains("post-meta"));
    }

    #[test]
    fn test_title_is_escaped() {
        let mut snapshot = snapshot();
        snapshot.posts.get_mut("P1").unwrap().title = "<script>".into();
        let renderer = HtmlRenderer::new(&snapshot);
        let entry = &snapshot.posts["P1"];

        let html = renderer.render(&Document::Post(PostDocument {
            entry,
            body_html: "",
            script: String::new(),
            highlight: false,
            sub_page: false,
        }));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_list_page_navigation() {
        let snapshot = snapshot();
        let renderer = HtmlRenderer::new(&snapshot);
        let pagination = Pagination::new(&snapshot.posts, 2);
        let pages = pagination.pages();

        let first = renderer.render(&Document::List(&pages[0]));
        assert!(first.contains(r#"<span class="disabled">"#));
        assert!(first.contains(r#"href="https://alice.github.io/blog/page2.html""#));
        assert!(first.contains("Post 3"));
        assert!(!first.contains("Post 1<"));
        assert!(first.contains("#dea584"));

        let second = renderer.render(&Document::List(&pages[1]));
        assert!(second.contains(r#"href="https://alice.github.io/blog/index.html""#));
        assert!(second.contains("Post 1"));
    }

    #[test]
    fn test_tag_page_lists_everything() {
        let snapshot = snapshot();
        let renderer = HtmlRenderer::new(&snapshot);
        let pagination = Pagination::new(&snapshot.posts, 1);

        let html = renderer.render(&Document::Tag(&pagination.sorted));
        for id in 1..=3 {
            assert!(html.contains(&format!("Post {id}")));
        }
        assert!(html.contains("data-labels"));
        assert!(html.contains("filterLabel"));
    }
}

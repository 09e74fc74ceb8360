//! README report written after each run.

use crate::{config::SiteConfig, generator::summary::Summary, utils::date};

/// Markdown report with the site's headline numbers.
pub fn render(config: &SiteConfig, summary: &Summary<'_>, generated_at: &str) -> String {
    let home = config.base.home_url();
    format!(
        "# {title} :link: {home}\n\
         - :page_facing_up: [{posts}]({home}/tag.html)\n\
         - :speech_balloon: {comments}\n\
         - :hibiscus: {words}\n\
         - :alarm_clock: {generated_at}\n\
         ---\n\
         *Powered by :heart: issuepress*\n",
        title = config.base.title,
        posts = summary.post_count(),
        comments = summary.comment_total,
        words = summary.word_total,
    )
}

/// [`render`] stamped with the current time in the site's UTC offset.
pub fn render_now(config: &SiteConfig, summary: &Summary<'_>) -> String {
    render(config, summary, &date::now_local(config.base.utc_offset))
}

//! HTML minification, toggled by `build.minify`.

use std::borrow::Cow;

/// Minify rendered HTML when `enabled`, otherwise borrow it unchanged.
pub fn minify_html(html: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(html);
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;

    let bytes = minify_html::minify(html.as_bytes(), &cfg);
    match String::from_utf8(bytes) {
        Ok(minified) => Cow::Owned(minified),
        Err(_) => Cow::Borrowed(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_html_basic() {
        let html = "<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let result = minify_html(html, true);

        assert!(!result.contains("\n  "));
        assert!(result.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_minify_html_preserves_text() {
        let result = minify_html("<p>你好 World</p>", true);
        assert!(result.contains("你好 World"));
    }

    #[test]
    fn test_minify_html_disabled() {
        let html = "<html>\n  <body>\n  </body>\n</html>";
        let result = minify_html(html, false);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, html);
    }
}

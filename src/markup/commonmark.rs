//! Offline CommonMark conversion with pulldown-cmark.

use super::{ConversionError, MarkupConverter};
use pulldown_cmark::{Options, Parser, html as md_html};

pub struct CommonmarkConverter {
    options: Options,
}

impl CommonmarkConverter {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
        }
    }
}

impl Default for CommonmarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for CommonmarkConverter {
    fn convert(&self, text: &str) -> Result<String, ConversionError> {
        let parser = Parser::new_ext(text, self.options);
        let mut html = String::with_capacity(text.len() * 3 / 2);
        md_html::push_html(&mut html, parser);
        Ok(html)
    }
}

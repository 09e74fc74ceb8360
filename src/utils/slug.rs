//! Slug derivation and filesystem-safe names.
//!
//! Titles become file stems via one of the [`UrlMode`] strategies, then
//! every character a filesystem may refuse is replaced with a hyphen.

use crate::config::UrlMode;

/// Characters forbidden in file names, besides C0 control characters.
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '/', '\\', '|', '?', '*', '"'];

const SEPARATOR: char = '-';

// ============================================================================
// Sanitization
// ============================================================================

fn is_forbidden(c: char) -> bool {
    FORBIDDEN_CHARS.contains(&c) || (c as u32) < 32
}

/// Replace forbidden characters with `-`, keeping everything else.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if is_forbidden(c) { SEPARATOR } else { c })
        .collect()
}

// ============================================================================
// Strategies
// ============================================================================

/// Derive the file stem for a post.
pub fn slugify(title: &str, id: u64, mode: UrlMode) -> String {
    let raw = match mode {
        UrlMode::Issue => id.to_string(),
        UrlMode::RuTranslit => ru_translit(title),
        UrlMode::Pinyin => pinyin(title),
    };
    sanitize(&raw)
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}')
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}')
}

/// Phonetic transliteration: each CJK character becomes its lowercase
/// syllable, runs of other characters are kept verbatim, and the pieces
/// are joined with `-`.
///
/// `"你好 World"` → `"ni-hao- World"`
fn pinyin(title: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut run = String::new();

    for c in title.chars() {
        if !is_cjk(c) {
            run.push(c);
            continue;
        }
        if !run.is_empty() {
            parts.push(std::mem::take(&mut run));
        }
        let syllable = deunicode::deunicode_char(c)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| c.to_string());
        parts.push(syllable);
    }
    if !run.is_empty() {
        parts.push(run);
    }

    parts.join("-")
}

/// Cyrillic to Latin, spaces as hyphens. Non-Cyrillic text is untouched.
///
/// `"Привет мир"` → `"Privet-mir"`
fn ru_translit(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            ' ' => SEPARATOR.to_string(),
            c if is_cyrillic(c) => deunicode::deunicode_char(c)
                .map(str::to_owned)
                .unwrap_or_else(|| c.to_string()),
            c => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_forbidden_chars() {
        assert_eq!(sanitize(r#"a<b>c:d/e\f|g?h*i"j"#), "a-b-c-d-e-f-g-h-i-j");
    }

    #[test]
    fn test_sanitize_replaces_control_chars() {
        assert_eq!(sanitize("a\tb\nc\u{0}d\u{1f}e"), "a-b-c-d-e");
    }

    #[test]
    fn test_sanitize_preserves_unicode_and_spaces() {
        assert_eq!(sanitize("你好 世界"), "你好 世界");
    }

    #[test]
    fn test_sanitize_never_leaves_forbidden() {
        let input: String = (0u8..128).map(char::from).collect();
        let out = sanitize(&input);
        assert!(out.chars().all(|c| !is_forbidden(c)));
        assert_eq!(out.chars().count(), input.chars().count());
    }

    #[test]
    fn test_slugify_issue_mode() {
        assert_eq!(slugify("Anything", 42, UrlMode::Issue), "42");
    }

    #[test]
    fn test_slugify_pinyin() {
        assert_eq!(slugify("你好", 1, UrlMode::Pinyin), "ni-hao");
        assert_eq!(slugify("Rust 笔记", 1, UrlMode::Pinyin), "Rust -bi-ji");
        assert_eq!(slugify("Hello World", 1, UrlMode::Pinyin), "Hello World");
    }

    #[test]
    fn test_slugify_pinyin_sanitizes() {
        assert_eq!(slugify("a/b: c?", 1, UrlMode::Pinyin), "a-b- c-");
    }

    #[test]
    fn test_slugify_ru_translit() {
        assert_eq!(slugify("Привет мир", 1, UrlMode::RuTranslit), "Privet-mir");
        assert_eq!(slugify("Rust и Go", 1, UrlMode::RuTranslit), "Rust-i-Go");
    }
}

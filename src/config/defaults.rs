//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn language() -> String {
        "CN".into()
    }

    pub fn utc_offset() -> i32 {
        8
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "docs".into()
    }

    pub fn post_dir() -> PathBuf {
        "post".into()
    }

    pub fn backup() -> PathBuf {
        "backup".into()
    }

    pub fn snapshot() -> PathBuf {
        "snapshot.json".into()
    }

    pub fn summary() -> PathBuf {
        "postList.json".into()
    }

    pub fn readme() -> PathBuf {
        "README.md".into()
    }

    pub fn page_size() -> usize {
        15
    }

    pub fn rss_split() -> String {
        "sentence".into()
    }

    pub fn year_colors() -> Vec<String> {
        ["#bc4c00", "#0969da", "#1f883d", "#A333D0"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "rss.xml".into()
        }
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    pub fn mode() -> String {
        "manual".into()
    }

    pub fn day() -> String {
        "light".into()
    }

    pub fn night() -> String {
        "dark".into()
    }

    pub fn comment_label_color() -> String {
        "#006b75".into()
    }
}

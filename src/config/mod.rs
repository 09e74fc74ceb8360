//! Site configuration management for `issuepress.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site identity (title, subtitle, avatar, urls)    |
//! | `[build]`   | Output paths, pagination, slugs, rss, fragments  |
//! | `[theme]`   | Presentation values handed to the renderer       |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! sub_title = "A personal blog"
//! avatar_url = "https://example.com/avatar.png"
//!
//! [build]
//! page_size = 10
//! sub_page_labels = ["about"]
//!
//! [theme]
//! bottom_text = "Powered by issues"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod theme;

pub use build::{MarkupKind, UrlMode};
pub use error::ConfigError;

use base::BaseConfig;
use build::BuildConfig;
use theme::ThemeConfig;

use crate::{cli::Cli, source::RepoSlug};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing issuepress.toml.
///
/// Immutable once [`SiteConfig::load`] returns; stored verbatim in every
/// snapshot.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity. Required.
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Presentation settings
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load, apply CLI overrides, resolve derived keys and validate.
    ///
    /// Any failure here aborts the run before a single record is touched.
    pub fn load(cli: &Cli, repo: &RepoSlug) -> Result<Self, ConfigError> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let mut config = Self::from_path(&root.join(&cli.config))?;
        config.update_with_cli(cli);
        config.load_fragments()?;
        config.resolve_derived(repo);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.root {
            self.set_root(root);
        }
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        if cli.offline {
            self.build.markup = MarkupKind::Commonmark;
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Replace `style`/`script` values naming an `.html` file with its contents.
    fn load_fragments(&mut self) -> Result<(), ConfigError> {
        let root = self.get_root().to_path_buf();
        for fragment in [&mut self.build.style, &mut self.build.script] {
            if fragment.ends_with(".html") {
                let path = root.join(fragment.as_str());
                let content =
                    fs::read_to_string(&path).map_err(|err| ConfigError::Io(path, err))?;
                *fragment = content + "\n";
            }
        }
        Ok(())
    }

    /// Fill in keys computed from other keys unless given explicitly.
    ///
    /// `home_url` points at the GitHub Pages site of `repo`: the bare
    /// `<owner>.github.io` host for the user-site repository, otherwise
    /// the project path below it.
    pub fn resolve_derived(&mut self, repo: &RepoSlug) {
        let base = &mut self.base;
        if base.display_title.is_none() {
            base.display_title = Some(base.title.clone());
        }
        if base.favicon_url.is_none() {
            base.favicon_url = Some(base.avatar_url.clone());
        }
        if base.og_image.is_none() {
            base.og_image = Some(base.avatar_url.clone());
        }
        if base.home_url.is_none() {
            let user_site = format!("{}.github.io", repo.owner);
            let mut url = format!("https://{user_site}");
            if !repo.name.eq_ignore_ascii_case(&user_site) {
                url.push('/');
                url.push_str(&repo.name);
            }
            base.home_url = Some(url);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("title", &self.base.title),
            ("sub_title", &self.base.sub_title),
            ("avatar_url", &self.base.avatar_url),
        ];
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::MissingKey(*key));
        }

        if self.build.page_size == 0 {
            return Err(ConfigError::Validation(
                "[build.page_size] must be at least 1".into(),
            ));
        }

        if self.build.year_colors.is_empty() {
            return Err(ConfigError::Validation(
                "[build.year_colors] must have at least one element".into(),
            ));
        }

        if let Some(home_url) = &self.base.home_url
            && !home_url.starts_with("http")
        {
            return Err(ConfigError::Validation(
                "[base.home_url] must start with http:// or https://".into(),
            ));
        }

        Ok(())
    }

    /// Delimiter that ends a record's feed description.
    ///
    /// `"sentence"` picks the full stop of the configured language.
    pub fn sentence_delimiter(&self) -> &str {
        match self.build.rss_split.as_str() {
            "sentence" if self.base.language == "CN" => "。",
            "sentence" => ".",
            other => other,
        }
    }

    /// Output directory, relative to the root.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Post pages directory, relative to the root.
    pub fn post_dir(&self) -> PathBuf {
        self.build.output.join(&self.build.post_dir)
    }

    /// Resolve a root-relative path to the path used for filesystem access.
    pub fn at_root(&self, path: impl AsRef<Path>) -> PathBuf {
        self.get_root().join(path)
    }

    pub fn rss_path(&self) -> PathBuf {
        self.build.output.join(&self.build.rss.path)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.build.output.join(&self.build.summary)
    }
}

// ============================================================================
// Tests
// ============================================================================

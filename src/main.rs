//! issuepress - A static blog generator fed by issue-tracker tickets.

mod build;
mod classify;
mod cli;
mod config;
mod data;
mod directive;
mod generator;
mod logger;
mod markup;
mod record;
mod render;
mod source;
mod utils;

use anyhow::{Context, Result};
use build::Pipeline;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use source::{RepoSlug, github::GithubSource};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.run_mode()?;
    let repo = RepoSlug::parse(&cli.repo)?;

    let config = SiteConfig::load(&cli, &repo)
        .with_context(|| format!("failed to load `{}`", cli.config.display()))?;
    log!("config"; "{} ({:?} mode)", config.base.home_url(), mode);

    let source = GithubSource::new(cli.token.as_str(), repo.clone());
    let converter = markup::converter(config.build.markup, &cli.token);

    let stats = Pipeline {
        config: &config,
        repo: &repo,
        source: &source,
        converter: converter.as_ref(),
        renderer: render::html::boxed,
        write_report: cli.writes_report(),
    }
    .run(mode)?;

    log!(
        "build";
        "{} issue(s) processed, {} posts and {} sub-pages online",
        stats.processed,
        stats.posts,
        stats.sub_pages
    );
    Ok(())
}

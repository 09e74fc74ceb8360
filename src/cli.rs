//! Command-line interface definitions.
//!
//! Defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// Build a static blog from the open issues of a repository
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// API token used for the issue tracker and markdown endpoint
    pub token: String,

    /// Repository holding the posts, as `owner/name`
    pub repo: String,

    /// Rebuild only this issue (`0` or empty rebuilds everything)
    #[arg(long = "issue-number", visible_alias = "issue_number", default_value = "0")]
    pub issue_number: String,

    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: issuepress.toml)
    #[arg(short = 'C', long, default_value = "issuepress.toml")]
    pub config: PathBuf,

    /// Convert markdown locally instead of calling the markdown endpoint
    #[arg(long)]
    pub offline: bool,

    /// Name of the triggering CI event; `schedule` skips the README report
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event: String,
}

/// Which records a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Every currently open record.
    Full,
    /// Exactly one record, merged into the previous snapshot.
    Single(u64),
}

impl Cli {
    /// Requested run mode. `""` and `"0"` mean a full rebuild.
    pub fn run_mode(&self) -> anyhow::Result<RunMode> {
        match self.issue_number.trim() {
            "" | "0" => Ok(RunMode::Full),
            number => number
                .parse()
                .map(RunMode::Single)
                .map_err(|_| anyhow::anyhow!("invalid issue number: `{number}`")),
        }
    }

    pub fn writes_report(&self) -> bool {
        self.event != "schedule"
    }
}

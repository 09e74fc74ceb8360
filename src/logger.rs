//! Run output.
//!
//! Every stage reports through `log!`, which prints `[module] message` with
//! a colored prefix and keeps each line within the terminal width.
//! `warn` and `error` lines go to stderr, everything else to stdout.
//!
//! ```ignore
//! log!("snapshot"; "loaded {} posts", count);
//! log!("warn"; "issue #{}: directive skipped", id);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::terminal;
use std::{
    io::{self, Write},
    sync::OnceLock,
};

/// Columns assumed when stdout is not a terminal.
const FALLBACK_COLUMNS: usize = 120;

/// `[`, `]` and the space after the prefix.
const PREFIX_DECORATION: usize = 3;

#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    State,
    Progress,
}

impl Severity {
    fn of(module: &str) -> Self {
        match module.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "snapshot" | "rss" => Self::State,
            _ => Self::Progress,
        }
    }

    fn paint(self, tag: String) -> ColoredString {
        match self {
            Self::Error => tag.bright_red().bold(),
            Self::Warn => tag.bright_magenta().bold(),
            Self::State => tag.bright_blue().bold(),
            Self::Progress => tag.bright_yellow().bold(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

fn columns() -> usize {
    static COLUMNS: OnceLock<usize> = OnceLock::new();
    *COLUMNS.get_or_init(|| {
        terminal::size()
            .map(|(width, _)| width as usize)
            .unwrap_or(FALLBACK_COLUMNS)
    })
}

/// Print one line; see the module docs.
pub fn log(module: &str, message: &str) {
    let severity = Severity::of(module);
    let room = columns().saturating_sub(module.len() + PREFIX_DECORATION);
    let line = format!(
        "{} {}",
        severity.paint(format!("[{module}]")),
        clip(message, room)
    );

    if severity.to_stderr() {
        writeln!(io::stderr().lock(), "{line}").ok();
    } else {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}").ok();
        out.flush().ok();
    }
}

/// Longest prefix of `message` that fits in `max` bytes without splitting
/// a character.
fn clip(message: &str, max: usize) -> &str {
    if message.len() <= max {
        return message;
    }
    let end = message
        .char_indices()
        .map(|(start, c)| start + c.len_utf8())
        .take_while(|&end| end <= max)
        .last()
        .unwrap_or(0);
    &message[..end]
}

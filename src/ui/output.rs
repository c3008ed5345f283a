//! ui::output
//!
//! Verbosity-aware terminal output.
//!
//! Progress and summaries go to stdout and are silenced by `--quiet`.
//! Warnings and errors go to stderr; errors are shown even in quiet mode.
//! Debug lines only appear with `--debug`.

use std::fmt::Display;
use std::path::Path;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Progress, warnings and summaries
    Normal,
    /// Everything, including per-step diagnostics
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn shows(self, level: Verbosity) -> bool {
        self >= level
    }
}

/// Print a progress line.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows(Verbosity::Normal) {
        println!("{message}");
    }
}

/// Print a diagnostic line to stderr.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows(Verbosity::Debug) {
        eprintln!("[debug] {message}");
    }
}

pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows(Verbosity::Normal) {
        eprintln!("warning: {message}");
    }
}

pub fn error(message: impl Display) {
    eprintln!("error: {message}");
}

/// `count` followed by the singular or plural noun.
pub fn count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Show `path` relative to `base` when it lives underneath it.
pub fn format_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// One item per line, each behind `indent`.
pub fn format_list<T: Display>(items: &[T], indent: &str) -> String {
    items
        .iter()
        .map(|item| format!("{indent}{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

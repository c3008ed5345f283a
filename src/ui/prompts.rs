//! ui::prompts
//!
//! Interactive confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode an
//! operation that needs an answer fails with [`PromptError::NotInteractive`]
//! and the user is expected to pass `--force` instead.

use std::io::{self, BufRead, Write};
use std::path::Path;

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode; pass --force to skip confirmation")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Asks the user before destructive operations.
pub trait Prompter {
    /// Ask whether the directory at `path` may be removed.
    fn confirm_removal(&self, path: &Path) -> Result<bool, PromptError>;
}

/// Prompter reading answers from the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm_removal(&self, path: &Path) -> Result<bool, PromptError> {
        confirm(
            &format!("Remove '{}'?", path.display()),
            false,
            self.interactive,
        )
    }
}

/// Prompt for confirmation (yes/no) on stdin.
///
/// An empty answer selects `default`. End of input cancels.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let mut stderr = io::stderr();
    write!(stderr, "{message} {hint} ").map_err(|e| PromptError::IoError(e.to_string()))?;
    stderr
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    let mut answer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }

    Ok(parse_answer(&answer).unwrap_or(default))
}

/// Interpret a yes/no answer; `None` for empty or unrecognized input.
fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

//! engine
//!
//! Dependency-graph traversals.
//!
//! # Architecture
//!
//! The engine walks a root [`Project`](crate::core::project::Project) and
//! its dependencies through three collaborators supplied by the caller:
//!
//! - a [`SourceProvider`](crate::source::SourceProvider) that fetches and
//!   checks out sources
//! - an [`Invoker`](crate::process::Invoker) that runs commands
//! - a [`Prompter`](crate::ui::prompts::Prompter) that confirms removals
//!
//! and reports what it does to an [`EventSink`](crate::events::EventSink).
//! It never prints.
//!
//! # Invariants
//!
//! - No dependency is processed twice in one call
//! - Two different dependencies claiming one path abort the call
//! - A dependency reappearing among its ancestors aborts the call before
//!   anything is fetched or loaded for it
//! - Failures propagate immediately; work already done stays on disk
//!
//! # Example
//!
//! ```ignore
//! use puck::engine::{UpdateOptions, Walker};
//!
//! let walker = Walker::new(&git, &ShellInvoker, &prompter, &events);
//! walker.update(&mut project, &UpdateOptions::default())?;
//! walker.execute(&mut project, "build", &ExecuteOptions::default())?;
//! ```

pub mod env;
pub mod trail;
pub mod walker;

pub use trail::{Trail, Visit};
pub use walker::{ExecuteOptions, UpdateOptions, Walker, WipeOptions, WipeReport};

use std::path::PathBuf;

use crate::error::PuckError;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags and configuration.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
    /// Include the root project's dev dependencies.
    pub dev: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
            dev: true,
        }
    }
}

impl Context {
    /// Directory the root project search starts from.
    pub fn start_dir(&self) -> Result<PathBuf, PuckError> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().map_err(|source| PuckError::Io {
                path: PathBuf::from("."),
                source,
            }),
        }
    }
}

//! engine::walker
//!
//! The three recursive traversals over a project's dependency graph.
//!
//! # Traversals
//!
//! - [`Walker::update`] fetches every dependency and checks out its
//!   selected version, depth-first, left to right
//! - [`Walker::execute`] runs a named command in every dependency, children
//!   before parents, optionally finishing with the root
//! - [`Walker::wipe`] removes the root's dependency directories
//!
//! Each call starts with a fresh [`Trail`](super::trail::Trail); nothing is remembered between
//! calls except what is on disk.
//!
//! # Dev dependencies
//!
//! `include_dev` applies to the root's direct dependencies only. Dev
//! dependencies of nested projects are always skipped.

mod execute;
mod update;
mod wipe;

pub use wipe::WipeReport;

use crate::core::dependency::Dependency;
use crate::core::types::EnvMap;
use crate::engine::env;
use crate::events::EventSink;
use crate::process::Invoker;
use crate::source::SourceProvider;
use crate::ui::prompts::Prompter;

/// Options for [`Walker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Verify the selected tag before checking it out.
    pub verify: bool,
    /// Include the root's dev dependencies.
    pub include_dev: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            verify: true,
            include_dev: true,
        }
    }
}

/// Options for [`Walker::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Abort on the first non-zero exit.
    pub check: bool,
    /// Also run the root project's own handler, last.
    pub include_root: bool,
    /// Include the root's dev dependencies.
    pub include_dev: bool,
    /// Environment laid over every dependency's env.
    pub overrides: EnvMap,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            check: false,
            include_root: false,
            include_dev: true,
            overrides: EnvMap::new(),
        }
    }
}

/// Options for [`Walker::wipe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeOptions {
    /// Remove without asking.
    pub force: bool,
    /// Include the root's dev dependencies.
    pub include_dev: bool,
}

impl Default for WipeOptions {
    fn default() -> Self {
        Self {
            force: false,
            include_dev: true,
        }
    }
}

/// Runs traversals against a set of collaborators.
pub struct Walker<'a> {
    source: &'a dyn SourceProvider,
    invoker: &'a dyn Invoker,
    prompter: &'a dyn Prompter,
    events: &'a EventSink,
    base_env: EnvMap,
}

impl std::fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("events", self.events)
            .field("base_env", &self.base_env.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Walker<'a> {
    /// A walker whose commands inherit the current process environment.
    pub fn new(
        source: &'a dyn SourceProvider,
        invoker: &'a dyn Invoker,
        prompter: &'a dyn Prompter,
        events: &'a EventSink,
    ) -> Self {
        Self {
            source,
            invoker,
            prompter,
            events,
            base_env: env::process_env(),
        }
    }

    /// Replace the base environment commands start from.
    pub fn with_base_env(mut self, base_env: EnvMap) -> Self {
        self.base_env = base_env;
        self
    }
}

/// Dependencies a traversal descends into.
fn selected(
    dependencies: &mut [Dependency],
    include_dev: bool,
) -> impl Iterator<Item = &mut Dependency> {
    dependencies
        .iter_mut()
        .filter(move |d| include_dev || !d.is_dev())
}

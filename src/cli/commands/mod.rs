//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves options from flags and configuration
//! 2. Discovers the root project
//! 3. Calls the engine with the production collaborators
//! 4. Summarizes the outcome
//!
//! Handlers never walk the dependency graph themselves.

mod completion;
mod execute;
mod update;
mod wipe;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use execute::execute;
pub use update::update;
pub use wipe::wipe;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::project::Project;
use crate::engine::Context;
use crate::events::{EventSink, TracingListener};
use crate::ui::{ConsoleListener, Verbosity};
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context, config: &Config) -> Result<()> {
    match command {
        Command::Update { no_verify } => update::update(ctx, config, no_verify),
        Command::Execute {
            command,
            check,
            root,
            env,
        } => execute::execute(ctx, config, &command, check, root, env),
        Command::Wipe { force } => wipe::wipe(ctx, force),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Discover the root project from the context's working directory.
fn load_root(ctx: &Context) -> Result<Project> {
    let start = ctx.start_dir()?;
    let project = Project::discover(&start)
        .with_context(|| format!("Failed to load project from '{}'", start.display()))?;
    tracing::debug!(
        project = project.name(),
        location = %project.location().display(),
        deps = %project.dependencies_root().display(),
        "found root project"
    );
    Ok(project)
}

/// Listeners every command reports to.
fn event_sink(ctx: &Context) -> EventSink {
    EventSink::new()
        .with(TracingListener)
        .with(ConsoleListener::new(Verbosity::from_flags(ctx.quiet, ctx.debug)))
}

//! ui::console
//!
//! Renders traversal events for people.

use crate::events::{Event, Listener};
use crate::ui::output::{self, Verbosity};

/// Prints one line per interesting event, honoring verbosity.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleListener {
    verbosity: Verbosity,
}

impl ConsoleListener {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Listener for ConsoleListener {
    fn notify(&self, event: &Event<'_>) {
        let v = self.verbosity;
        match event {
            Event::Update { dependency } => {
                output::print(format!("Updating dependency {} ...", dependency.path()), v)
            }
            Event::Checkout {
                dependency,
                reference,
            } => output::debug(
                format!("checking out `{}` in {}", reference, dependency.path()),
                v,
            ),
            Event::NoMatchingTags {
                dependency,
                pattern,
            } => output::warn(
                format!(
                    "no matching tags in repository `{}` for pattern `{}`",
                    dependency.full_path().display(),
                    pattern
                ),
                v,
            ),
            Event::LoadProject { project } => output::debug(
                format!(
                    "loaded {} ({} dependencies)",
                    project.location().display(),
                    project.dependencies().len()
                ),
                v,
            ),
            // Fatal events are reported once, by the error they turn into.
            Event::DependencyConflict {
                existing,
                conflicting,
            } => output::debug(
                format!("conflicting dependencies:\n  {existing}\n  {conflicting}"),
                v,
            ),
            Event::DependencyCycle {
                dependency,
                ancestors,
            } => output::debug(
                format!(
                    "{} depends on itself through:\n{}",
                    dependency,
                    output::format_list(ancestors, "  ")
                ),
                v,
            ),
            Event::MissingDependency { dependency } => output::debug(
                format!(
                    "missing dependency `{}` at {}",
                    dependency.path(),
                    dependency.full_path().display()
                ),
                v,
            ),
            Event::Execute { project, command } => output::print(
                format!("{:<12} executing command `{}`", format!("{}:", project.name()), command),
                v,
            ),
            Event::NoCommandHandler { project, command } => output::print(
                format!(
                    "{:<12} no handler for command `{}`",
                    format!("{}:", project.name()),
                    command
                ),
                v,
            ),
            Event::Call { command, cwd } => {
                output::print(format!("[{}] {}", cwd.display(), command), v)
            }
            Event::Wipe { dependency } => output::print(
                format!("Removing {} ...", dependency.full_path().display()),
                v,
            ),
            Event::WipeSkipped { dependency } => {
                output::print(format!("Keeping {}", dependency.full_path().display()), v)
            }
        }
    }
}

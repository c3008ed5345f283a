//! events::tracing_listener
//!
//! Forwards traversal events to `tracing` as structured records.

use tracing::{debug, error, info, warn};

use super::{Event, Listener};

/// Emits one `tracing` event per traversal event, under the `puck::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl Listener for TracingListener {
    fn notify(&self, event: &Event<'_>) {
        let name = event.name();
        match event {
            Event::Update { dependency } => info!(
                target: "puck::events",
                event = name,
                path = %dependency.full_path().display(),
                source = %dependency.source(),
                selector = %dependency.selector(),
            ),
            Event::Checkout {
                dependency,
                reference,
            } => debug!(
                target: "puck::events",
                event = name,
                path = %dependency.full_path().display(),
                reference,
            ),
            Event::NoMatchingTags {
                dependency,
                pattern,
            } => warn!(
                target: "puck::events",
                event = name,
                path = %dependency.full_path().display(),
                pattern = %pattern,
            ),
            Event::LoadProject { project } => debug!(
                target: "puck::events",
                event = name,
                project = project.name(),
                location = %project.location().display(),
                dependencies = project.dependencies().len(),
            ),
            Event::DependencyConflict {
                existing,
                conflicting,
            } => error!(
                target: "puck::events",
                event = name,
                existing = %existing,
                conflicting = %conflicting,
            ),
            Event::DependencyCycle {
                dependency,
                ancestors,
            } => error!(
                target: "puck::events",
                event = name,
                dependency = %dependency,
                depth = ancestors.len(),
            ),
            Event::MissingDependency { dependency } => error!(
                target: "puck::events",
                event = name,
                path = %dependency.full_path().display(),
            ),
            Event::Execute { project, command } | Event::NoCommandHandler { project, command } => {
                debug!(
                    target: "puck::events",
                    event = name,
                    project = project.name(),
                    command,
                )
            }
            Event::Call { command, cwd } => debug!(
                target: "puck::events",
                event = name,
                command = %command,
                cwd = %cwd.display(),
            ),
            Event::Wipe { dependency } | Event::WipeSkipped { dependency } => info!(
                target: "puck::events",
                event = name,
                path = %dependency.full_path().display(),
            ),
        }
    }
}

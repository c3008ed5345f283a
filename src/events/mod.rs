//! events
//!
//! Lifecycle events emitted by the traversals.
//!
//! # Design
//!
//! Every state transition of a traversal emits one [`Event`] to an
//! [`EventSink`], which forwards it synchronously to each registered
//! [`Listener`] in registration order. Listeners cannot fail: rendering,
//! logging and recording are their own concern and never steer a traversal.
//!
//! The core never formats user-facing text. Events carry the dependency,
//! project and context values; [`crate::ui::ConsoleListener`] renders them
//! for people, [`TracingListener`] forwards them to `tracing`, and
//! [`Recorder`] keeps a compact log for tests and tooling.

mod recorder;
mod tracing_listener;

pub use recorder::Recorder;
pub use tracing_listener::TracingListener;

use std::path::Path;

use crate::core::dependency::{Dependency, Identity};
use crate::core::project::Project;
use crate::core::types::{CommandLine, TagPattern};

/// Something that happened during a traversal.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A dependency is about to be fetched.
    Update { dependency: &'a Dependency },

    /// A dependency's working tree is moving to `reference`.
    Checkout {
        dependency: &'a Dependency,
        reference: &'a str,
    },

    /// No tag matched the dependency's pattern; the tree stays as fetched.
    NoMatchingTags {
        dependency: &'a Dependency,
        pattern: &'a TagPattern,
    },

    /// A nested project was loaded from a dependency directory.
    LoadProject { project: &'a Project },

    /// Two different declarations share a path.
    DependencyConflict {
        existing: &'a Identity,
        conflicting: &'a Identity,
    },

    /// A dependency appears among its own ancestors.
    DependencyCycle {
        dependency: &'a Identity,
        ancestors: &'a [Identity],
    },

    /// A dependency directory does not exist.
    MissingDependency { dependency: &'a Dependency },

    /// A project is about to run its handler for `command`.
    Execute {
        project: &'a Project,
        command: &'a str,
    },

    /// A project has no handler for `command`.
    NoCommandHandler {
        project: &'a Project,
        command: &'a str,
    },

    /// An external command is being invoked.
    Call {
        command: &'a CommandLine,
        cwd: &'a Path,
    },

    /// A dependency directory is being removed.
    Wipe { dependency: &'a Dependency },

    /// Removal of a dependency directory was declined.
    WipeSkipped { dependency: &'a Dependency },
}

impl Event<'_> {
    /// Stable kebab-case name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Update { .. } => "update",
            Event::Checkout { .. } => "checkout",
            Event::NoMatchingTags { .. } => "no-matching-tags",
            Event::LoadProject { .. } => "load-project",
            Event::DependencyConflict { .. } => "dependency-conflict",
            Event::DependencyCycle { .. } => "dependency-cycle",
            Event::MissingDependency { .. } => "missing-dependency",
            Event::Execute { .. } => "execute",
            Event::NoCommandHandler { .. } => "no-command-handler",
            Event::Call { .. } => "call",
            Event::Wipe { .. } => "wipe",
            Event::WipeSkipped { .. } => "wipe-skipped",
        }
    }

    /// The dependency path, project name or command the event is about.
    pub fn subject(&self) -> String {
        match self {
            Event::Update { dependency }
            | Event::Checkout { dependency, .. }
            | Event::NoMatchingTags { dependency, .. }
            | Event::MissingDependency { dependency }
            | Event::Wipe { dependency }
            | Event::WipeSkipped { dependency } => dependency.path().to_string(),
            Event::LoadProject { project }
            | Event::Execute { project, .. }
            | Event::NoCommandHandler { project, .. } => project.name().to_string(),
            Event::DependencyConflict { conflicting, .. } => path_name(conflicting.path()),
            Event::DependencyCycle { dependency, .. } => path_name(dependency.path()),
            Event::Call { command, .. } => command.to_string(),
        }
    }
}

fn path_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Observer of traversal events.
pub trait Listener {
    /// Called synchronously for every event.
    fn notify(&self, event: &Event<'_>);
}

/// Ordered fan-out to listeners.
#[derive(Default)]
pub struct EventSink {
    listeners: Vec<Box<dyn Listener>>,
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventSink {
    /// A sink with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener, builder style.
    pub fn with(mut self, listener: impl Listener + 'static) -> Self {
        self.subscribe(listener);
        self
    }

    /// Add a listener. Listeners are notified in the order they were added.
    pub fn subscribe(&mut self, listener: impl Listener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Notify every listener.
    pub fn emit(&self, event: Event<'_>) {
        for listener in &self.listeners {
            listener.notify(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<L: Listener + ?Sized> Listener for std::rc::Rc<L> {
    fn notify(&self, event: &Event<'_>) {
        (**self).notify(event);
    }
}

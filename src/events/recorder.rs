//! events::recorder
//!
//! A listener that keeps a compact `"<event> <subject>"` log.

use std::cell::RefCell;

use super::{Event, Listener};

/// Records every event as `"<name> <subject>"`.
///
/// Share it with an [`super::EventSink`] through an `Rc` to read the log back.
#[derive(Debug, Default)]
pub struct Recorder {
    lines: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded line, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Recorded lines for one event name, subjects only.
    pub fn subjects(&self, name: &str) -> Vec<String> {
        let prefix = format!("{name} ");
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// How many times an event was seen.
    pub fn count(&self, name: &str) -> usize {
        self.subjects(name).len()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl Listener for Recorder {
    fn notify(&self, event: &Event<'_>) {
        self.lines
            .borrow_mut()
            .push(format!("{} {}", event.name(), event.subject()));
    }
}

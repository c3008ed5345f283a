//! engine::trail
//!
//! Visited-set and ancestor-stack bookkeeping for one traversal call.
//!
//! # Invariants
//!
//! - The visited set only grows during a call; siblings share it, so a
//!   dependency reached through two parents is processed once
//! - The ancestor stack holds exactly the dependencies on the current call
//!   path, pushed by [`Trail::enter`] and popped by [`Trail::leave`]
//! - The cycle check runs before the visited check: an ancestor is already
//!   visited, and without the stack a self-reference would read as a
//!   harmless duplicate

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::dependency::Identity;
use crate::error::PuckError;
use crate::events::{Event, EventSink};

/// Outcome of checking a dependency against the visited set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Path not seen yet in this call.
    Fresh,
    /// Same dependency already handled through another parent.
    Duplicate,
}

/// State threaded through a recursive traversal.
#[derive(Debug, Default)]
pub struct Trail {
    visited: BTreeMap<PathBuf, Identity>,
    ancestors: Vec<Identity>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `identity` onto the ancestor stack.
    ///
    /// # Errors
    ///
    /// [`PuckError::DependencyCycle`] if an ancestor has the same path or the
    /// same identity. A `dependency-cycle` event is emitted first and the
    /// stack is left unchanged.
    pub fn enter(&mut self, identity: Identity, events: &EventSink) -> Result<(), PuckError> {
        let repeated = self
            .ancestors
            .iter()
            .position(|a| a.path() == identity.path() || a.same_as(&identity));

        if let Some(index) = repeated {
            events.emit(Event::DependencyCycle {
                dependency: &identity,
                ancestors: &self.ancestors,
            });

            let chain: Vec<String> = self.ancestors[index..]
                .iter()
                .chain(std::iter::once(&identity))
                .map(|a| short_name(a.path()))
                .collect();
            return Err(PuckError::DependencyCycle {
                dependency: identity.to_string(),
                chain: chain.join(" -> "),
            });
        }

        self.ancestors.push(identity);
        Ok(())
    }

    /// Pop the innermost ancestor.
    pub fn leave(&mut self) -> Option<Identity> {
        self.ancestors.pop()
    }

    /// Compare `identity` with whatever already claimed its path.
    ///
    /// # Errors
    ///
    /// [`PuckError::DependencyConflict`] if a different dependency claimed
    /// the path. A `dependency-conflict` event is emitted first.
    pub fn check_visited(&self, identity: &Identity, events: &EventSink) -> Result<Visit, PuckError> {
        let Some(existing) = self.visited.get(identity.path()) else {
            return Ok(Visit::Fresh);
        };

        if existing.same_as(identity) {
            return Ok(Visit::Duplicate);
        }

        events.emit(Event::DependencyConflict {
            existing,
            conflicting: identity,
        });
        Err(PuckError::DependencyConflict {
            path: identity.path().to_path_buf(),
            existing: existing.to_string(),
            conflicting: identity.to_string(),
        })
    }

    /// Record `identity` as handled. The first claim on a path wins.
    pub fn mark_visited(&mut self, identity: Identity) {
        self.visited
            .entry(identity.path().to_path_buf())
            .or_insert(identity);
    }

    #[cfg(test)]
    fn is_visited(&self, path: &Path) -> bool {
        self.visited.contains_key(path)
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

fn short_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

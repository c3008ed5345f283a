//! Puck - dependency management for projects kept in separate Git repositories
//!
//! A project declares its dependencies in a `Package.json` manifest at its
//! root. Each dependency is itself a project, checked out from its own
//! repository, and may declare further dependencies. Puck materializes that
//! tree into a single flat dependency directory and runs named commands
//! against every node of it.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - The three graph traversals: update, execute, wipe
//! - [`core`] - Projects, dependencies, manifests, configuration
//! - [`source`] - The `SourceProvider` seam for version control
//! - [`git`] - git2-backed `SourceProvider`
//! - [`process`] - The `Invoker` seam for running external commands
//! - [`events`] - Lifecycle events and listener fan-out
//! - [`ui`] - Output rendering and prompts
//!
//! # Traversal Invariants
//!
//! 1. A dependency path is processed at most once per traversal
//! 2. Two declarations at one path must have the same identity, or the
//!    traversal fails with a conflict
//! 3. An identity that reappears among its own ancestors is a cycle, and
//!    fails before anything is fetched for it

pub mod cli;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod git;
pub mod process;
pub mod source;
pub mod ui;

pub use error::PuckError;

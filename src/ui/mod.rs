//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Removal confirmations
//! - [`output`] - Output formatting and display
//! - [`console`] - Human-readable rendering of traversal events
//!
//! # Design
//!
//! All user-facing text goes through this module so that quiet and debug
//! modes, and interactive vs non-interactive sessions, are handled in one
//! place. The traversal engine itself only emits events.

pub mod console;
pub mod output;
pub mod prompts;

pub use console::ConsoleListener;
pub use output::Verbosity;
pub use prompts::{Prompter, TerminalPrompter};

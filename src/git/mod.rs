//! git
//!
//! Git-backed source provider.
//!
//! # Architecture
//!
//! This module is the only place that imports `git2`. [`Git`] wraps one
//! dependency checkout and exposes the handful of operations a dependency
//! needs: clone, fetch, list tags, check out and default-branch lookup.
//! [`GitProvider`] adapts it to [`crate::source::SourceProvider`].
//!
//! Tag signature verification is the one operation libgit2 cannot do. It is
//! delegated to the `git` executable through a [`crate::process::Invoker`].
//!
//! # Example
//!
//! ```ignore
//! use puck::git::GitProvider;
//! use puck::source::SourceProvider;
//!
//! let provider = GitProvider::new();
//! provider.fetch_latest(&deps.join("lib"), &source)?;
//! provider.checkout(&deps.join("lib"), "v1.2.0")?;
//! ```

mod interface;
mod provider;

pub use interface::{Git, GitError};
pub use provider::GitProvider;

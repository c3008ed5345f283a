//! source
//!
//! The version-control seam.
//!
//! # Architecture
//!
//! Traversals never talk to a version-control system directly. They call a
//! [`SourceProvider`], which materializes a [`Source`] into a directory and
//! moves its working tree between references. [`crate::git::GitProvider`]
//! is the production implementation; tests substitute in-memory fakes.
//!
//! # Contract
//!
//! - `fetch_latest` clones when the directory is absent and fetches when it
//!   exists, trying mirror URLs in order until one succeeds
//! - `list_tags` returns every tag matching the pattern, in any order
//! - `verify_tag` fails with [`SourceError::Verification`] when the tag's
//!   signature cannot be verified
//! - `checkout` moves the working tree to a branch, tag or commit

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Source, TagPattern};

/// Errors from source providers.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Every URL failed to clone.
    #[error("failed to clone {urls} into '{path}': {message}")]
    CloneFailed {
        urls: String,
        path: PathBuf,
        message: String,
    },

    /// Fetching into an existing checkout failed.
    #[error("failed to fetch into '{path}': {message}")]
    FetchFailed { path: PathBuf, message: String },

    /// The directory exists but is not a repository.
    #[error("'{path}' exists but is not a repository")]
    NotARepo { path: PathBuf },

    /// The reference to check out does not exist.
    #[error("reference '{reference}' not found in '{path}'")]
    RefNotFound { path: PathBuf, reference: String },

    /// Tag signature verification failed.
    #[error("could not verify tag '{tag}' in '{path}': {message}")]
    Verification {
        path: PathBuf,
        tag: String,
        message: String,
    },

    /// Any other provider failure.
    #[error("source error: {message}")]
    Internal { message: String },
}

/// Fetches and checks out dependency sources.
pub trait SourceProvider {
    /// Bring `path` up to date with `source`, cloning if needed.
    fn fetch_latest(&self, path: &Path, source: &Source) -> Result<(), SourceError>;

    /// Tags in the repository at `path` matching `pattern`.
    fn list_tags(&self, path: &Path, pattern: &TagPattern) -> Result<Vec<String>, SourceError>;

    /// Verify the authenticity of `tag`.
    fn verify_tag(&self, path: &Path, tag: &str) -> Result<(), SourceError>;

    /// Move the working tree at `path` to `reference`.
    fn checkout(&self, path: &Path, reference: &str) -> Result<(), SourceError>;

    /// The branch to check out when a dependency names no reference.
    fn default_branch(&self, path: &Path) -> Result<String, SourceError>;
}

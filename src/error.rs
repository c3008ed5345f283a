//! error
//!
//! The failure taxonomy shared by every traversal.
//!
//! Each fatal kind maps to its own process exit code so that calling tooling
//! can tell failure classes apart without parsing messages.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::manifest::ManifestError;
use crate::process::ProcessError;
use crate::source::SourceError;
use crate::ui::prompts::PromptError;

/// Errors that abort a traversal.
#[derive(Debug, Error)]
pub enum PuckError {
    /// No manifest between the starting directory and the search boundary.
    #[error("no Package.json found in '{start}' or any parent directory up to the home directory")]
    NoManifestFound {
        /// Where the search started
        start: PathBuf,
    },

    /// A manifest exists but could not be read or understood.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A dependency was never materialized (run `puck update` first).
    #[error("dependency '{name}' is missing at '{path}'; run `puck update` first")]
    MissingDependency {
        /// Declared materialized path
        name: String,
        /// Absolute directory that was expected to exist
        path: PathBuf,
    },

    /// Two different dependencies want the same directory.
    #[error("dependency conflict at '{path}': {existing} and {conflicting} differ in repository, version, env or commands")]
    DependencyConflict {
        /// The contested directory
        path: PathBuf,
        /// The declaration that claimed the path first
        existing: String,
        /// The declaration that collided with it
        conflicting: String,
    },

    /// A dependency transitively depends on itself.
    #[error("dependency cycle: {chain}")]
    DependencyCycle {
        /// The offending dependency
        dependency: String,
        /// Ancestors from the outermost down to the repeated dependency
        chain: String,
    },

    /// Tag authenticity check failed.
    #[error("could not verify tag '{tag}' in '{path}': {message}")]
    RepoVerification {
        /// Repository directory
        path: PathBuf,
        /// Tag that failed verification
        tag: String,
        /// Verifier output
        message: String,
    },

    /// Clone, fetch or checkout failed.
    #[error(transparent)]
    Source(SourceError),

    /// An external command failed to start, or exited non-zero under `--check`.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Confirmation prompt could not be answered.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Filesystem error outside of the source provider.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

impl PuckError {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            PuckError::NoManifestFound { .. } => 2,
            PuckError::MissingDependency { .. } => 3,
            PuckError::DependencyConflict { .. } => 4,
            PuckError::RepoVerification { .. } => 5,
            PuckError::DependencyCycle { .. } => 6,
            PuckError::Source(_) => 7,
            PuckError::Process(_) => 8,
            PuckError::Manifest(_) | PuckError::Prompt(_) | PuckError::Io { .. } => 1,
        }
    }
}

impl From<SourceError> for PuckError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Verification { path, tag, message } => {
                PuckError::RepoVerification { path, tag, message }
            }
            other => PuckError::Source(other),
        }
    }
}

//! git::provider
//!
//! [`SourceProvider`] backed by [`Git`].

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::interface::{Git, GitError};
use crate::core::types::{Source, TagPattern};
use crate::process::{Invocation, Invoker, ProcessError, ShellInvoker};
use crate::source::{SourceError, SourceProvider};

/// Production source provider.
pub struct GitProvider {
    invoker: Box<dyn Invoker>,
}

impl std::fmt::Debug for GitProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitProvider").finish_non_exhaustive()
    }
}

impl Default for GitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider {
    /// Provider that verifies tags with the `git` found on `PATH`.
    pub fn new() -> Self {
        Self::with_invoker(Box::new(ShellInvoker))
    }

    /// Provider that runs `git tag --verify` through `invoker`.
    pub fn with_invoker(invoker: Box<dyn Invoker>) -> Self {
        Self { invoker }
    }

    fn clone_any(&self, path: &Path, source: &Source) -> Result<(), SourceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SourceError::CloneFailed {
                urls: source.to_string(),
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let mut failures = Vec::new();
        for url in source.urls() {
            debug!(url, path = %path.display(), "cloning");
            match Git::clone_from(url, path) {
                Ok(_) => return Ok(()),
                Err(err) => {
                    warn!(url, error = %err, "clone failed, trying next mirror");
                    failures.push(err.to_string());
                    if path.exists() {
                        // Partial clone.
                        let _ = fs::remove_dir_all(path);
                    }
                }
            }
        }

        Err(SourceError::CloneFailed {
            urls: source.to_string(),
            path: path.to_path_buf(),
            message: failures.join("; "),
        })
    }

    fn fetch_any(&self, path: &Path, source: &Source) -> Result<(), SourceError> {
        let git = open(path)?;
        let mut failures = Vec::new();

        match git.fetch_origin() {
            Ok(()) => return Ok(()),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "fetch from origin failed");
                failures.push(err.to_string());
            }
        }

        for url in source.urls() {
            match git.fetch_url(url) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(url, error = %err, "fetch failed, trying next mirror");
                    failures.push(err.to_string());
                }
            }
        }

        Err(SourceError::FetchFailed {
            path: path.to_path_buf(),
            message: failures.join("; "),
        })
    }
}

fn open(path: &Path) -> Result<Git, SourceError> {
    Git::open(path).map_err(|_| SourceError::NotARepo {
        path: path.to_path_buf(),
    })
}

fn internal(err: GitError) -> SourceError {
    SourceError::Internal {
        message: err.to_string(),
    }
}

impl SourceProvider for GitProvider {
    fn fetch_latest(&self, path: &Path, source: &Source) -> Result<(), SourceError> {
        if path.is_dir() {
            self.fetch_any(path, source)
        } else {
            self.clone_any(path, source)
        }
    }

    fn list_tags(&self, path: &Path, pattern: &TagPattern) -> Result<Vec<String>, SourceError> {
        let tags = open(path)?.tag_names(pattern.as_str()).map_err(internal)?;
        Ok(tags.into_iter().filter(|t| pattern.matches(t)).collect())
    }

    fn verify_tag(&self, path: &Path, tag: &str) -> Result<(), SourceError> {
        let invocation = Invocation::argv(["git", "tag", "--verify", tag], path)
            .capture()
            .check(true);

        self.invoker
            .run(&invocation)
            .map(|_| ())
            .map_err(|err| SourceError::Verification {
                path: path.to_path_buf(),
                tag: tag.to_string(),
                message: match err {
                    ProcessError::Failed { stderr, .. } if !stderr.trim().is_empty() => {
                        stderr.trim().to_string()
                    }
                    other => other.to_string(),
                },
            })
    }

    fn checkout(&self, path: &Path, reference: &str) -> Result<(), SourceError> {
        open(path)?.checkout(reference).map_err(|err| match err {
            GitError::RefNotFound { .. } => SourceError::RefNotFound {
                path: path.to_path_buf(),
                reference: reference.to_string(),
            },
            other => internal(other),
        })
    }

    fn default_branch(&self, path: &Path) -> Result<String, SourceError> {
        Ok(open(path)?.default_branch())
    }
}

//! git::interface
//!
//! Thin wrapper over `git2` for a single dependency checkout.
//!
//! # Error Handling
//!
//! libgit2 errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Directory exists but holds no repository
//! - [`GitError::RefNotFound`]: Requested branch, tag or commit does not exist
//! - [`GitError::Remote`]: Clone or fetch against a URL failed
//! - [`GitError::Internal`]: Anything else

use std::path::{Path, PathBuf};

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{AutotagOption, FetchOptions, Repository};
use thiserror::Error;

/// Refspecs fetched into every checkout.
const FETCH_REFSPECS: [&str; 2] = [
    "+refs/heads/*:refs/remotes/origin/*",
    "+refs/tags/*:refs/tags/*",
];

/// Branch assumed when a repository does not advertise one.
pub const FALLBACK_BRANCH: &str = "master";

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The directory that was opened
        path: PathBuf,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Talking to a remote failed.
    #[error("{url}: {message}")]
    Remote {
        /// The URL that was contacted
        url: String,
        /// Description of the failure
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => GitError::RefNotFound {
                refname: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// A dependency checkout.
pub struct Git {
    repo: Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository rooted exactly at `path`.
    ///
    /// Unlike discovery, this never walks up into an enclosing repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `path` is not the root of a repository
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::open(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Clone `url` into `path`, fetching all tags.
    pub fn clone_from(url: &str, path: &Path) -> Result<Self, GitError> {
        let mut fetch = FetchOptions::new();
        fetch.download_tags(AutotagOption::All);
        let repo = RepoBuilder::new()
            .fetch_options(fetch)
            .clone(url, path)
            .map_err(|e| GitError::Remote {
                url: url.to_string(),
                message: e.message().to_string(),
            })?;
        Ok(Self { repo })
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Fetch branches and tags from `origin`.
    pub fn fetch_origin(&self) -> Result<(), GitError> {
        let mut remote = self.repo.find_remote("origin")?;
        let url = remote.url().unwrap_or("origin").to_string();
        Self::fetch_remote(&mut remote, &url)
    }

    /// Fetch branches and tags from an arbitrary URL into the origin namespace.
    pub fn fetch_url(&self, url: &str) -> Result<(), GitError> {
        let mut remote = self.repo.remote_anonymous(url)?;
        Self::fetch_remote(&mut remote, url)
    }

    fn fetch_remote(remote: &mut git2::Remote<'_>, url: &str) -> Result<(), GitError> {
        let mut options = FetchOptions::new();
        options.download_tags(AutotagOption::All);
        remote
            .fetch(&FETCH_REFSPECS, Some(&mut options), None)
            .map_err(|e| GitError::Remote {
                url: url.to_string(),
                message: e.message().to_string(),
            })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Tag names matching a glob, as understood by libgit2.
    pub fn tag_names(&self, pattern: &str) -> Result<Vec<String>, GitError> {
        let names = self.repo.tag_names(Some(pattern))?;
        Ok(names.iter().flatten().map(str::to_string).collect())
    }

    /// Whether a ref with this full name exists.
    pub fn ref_exists(&self, refname: &str) -> bool {
        self.repo.find_reference(refname).is_ok()
    }

    /// Branch the remote points `HEAD` at, falling back to the local branch.
    pub fn default_branch(&self) -> String {
        if let Ok(reference) = self.repo.find_reference("refs/remotes/origin/HEAD") {
            if let Some(target) = reference.symbolic_target() {
                if let Some(branch) = target.strip_prefix("refs/remotes/origin/") {
                    return branch.to_string();
                }
            }
        }

        match self.repo.head() {
            Ok(head) if head.is_branch() => head
                .shorthand()
                .map(str::to_string)
                .unwrap_or_else(|| FALLBACK_BRANCH.to_string()),
            _ => FALLBACK_BRANCH.to_string(),
        }
    }

    /// Commit id `HEAD` points at.
    pub fn head_commit(&self) -> Result<String, GitError> {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        Ok(commit.id().to_string())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Move the working tree to `reference`.
    ///
    /// A name matching a fetched remote branch resets the local branch of the
    /// same name to it and checks that branch out. Anything else (tag, local
    /// branch, commit) is resolved with rev-parse; tags and commits leave
    /// `HEAD` detached.
    pub fn checkout(&self, reference: &str) -> Result<(), GitError> {
        let remote_ref = format!("refs/remotes/origin/{reference}");
        if self.ref_exists(&remote_ref) {
            return self.checkout_remote_branch(reference, &remote_ref);
        }

        let (object, resolved) = self
            .repo
            .revparse_ext(reference)
            .map_err(|e| GitError::from_git2(e, reference))?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, reference))?;

        self.repo
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))?;

        match resolved {
            Some(r) if r.is_branch() => {
                let name = r.name().ok_or_else(|| GitError::Internal {
                    message: format!("branch name for '{reference}' is not UTF-8"),
                })?;
                self.repo.set_head(name)?;
            }
            _ => self.repo.set_head_detached(commit.id())?,
        }
        Ok(())
    }

    fn checkout_remote_branch(&self, branch: &str, remote_ref: &str) -> Result<(), GitError> {
        let commit = self
            .repo
            .find_reference(remote_ref)
            .and_then(|r| r.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, remote_ref))?;

        self.repo
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))?;
        // The branch may be the current HEAD, which cannot be force-moved.
        self.repo.set_head_detached(commit.id())?;
        self.repo.branch(branch, &commit, true)?;
        self.repo.set_head(&format!("refs/heads/{branch}"))?;
        Ok(())
    }
}

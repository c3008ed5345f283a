//! core::paths
//!
//! Path routing for projects and their dependencies.
//!
//! # Layout
//!
//! ```text
//! <root>/Package.json     manifest
//! <root>/deps/<path>/     every dependency in the graph, flat
//! ```
//!
//! Nested projects do not get a dependency directory of their own: they
//! share the root's, so a dependency reached through two parents lands in
//! one directory. That sharing is what makes duplicate and conflicting
//! declarations detectable by path.
//!
//! # Example
//!
//! ```
//! use puck::core::paths::{derive_path, ProjectPaths};
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::new(PathBuf::from("/work/app"), None);
//! assert_eq!(paths.manifest_path(), PathBuf::from("/work/app/Package.json"));
//! assert_eq!(
//!     paths.dependency_path(&derive_path("https://github.com/mcinglis/libmacro.git")),
//!     PathBuf::from("/work/app/deps/libmacro")
//! );
//! ```

use std::path::{Path, PathBuf};

/// File name of a project manifest.
pub const MANIFEST_FILE: &str = "Package.json";

/// Default dependency directory name under the root project.
pub const DEPENDENCIES_DIR: &str = "deps";

/// Environment variable carrying the absolute dependency directory to scripts.
pub const DEPS_DIR_ENV: &str = "DEPS_DIR";

/// Derive a dependency directory name from a repository URL.
///
/// Strips trailing `/`, a trailing `.git`, and everything up to the last
/// `/` or `:` (scheme, host, owner).
///
/// # Example
///
/// ```
/// use puck::core::paths::derive_path;
///
/// assert_eq!(derive_path("https://github.com/owner/repo.git"), "repo");
/// assert_eq!(derive_path("git@github.com:owner/repo"), "repo");
/// assert_eq!(derive_path("../sibling/"), "sibling");
/// ```
pub fn derive_path(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

/// Walk up from `start` looking for a directory containing a manifest.
///
/// The walk stops after checking `boundary` (typically the home directory)
/// or the filesystem root, whichever comes first.
pub fn find_project_root(start: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(MANIFEST_FILE).is_file() {
            return Some(dir.to_path_buf());
        }
        if boundary.is_some_and(|b| same_dir(dir, b)) {
            return None;
        }
        current = dir.parent();
    }
    None
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Paths belonging to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    location: PathBuf,
    dependencies_root: PathBuf,
}

impl ProjectPaths {
    /// Create paths for a project at `location`.
    ///
    /// `dependencies_root` defaults to `<location>/deps`; a relative override
    /// is resolved against `location`.
    pub fn new(location: PathBuf, dependencies_root: Option<PathBuf>) -> Self {
        let dependencies_root = match dependencies_root {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => location.join(dir),
            None => location.join(DEPENDENCIES_DIR),
        };
        Self {
            location,
            dependencies_root,
        }
    }

    /// The project directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Where dependencies are materialized.
    pub fn dependencies_root(&self) -> &Path {
        &self.dependencies_root
    }

    /// The manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.location.join(MANIFEST_FILE)
    }

    /// Absolute directory for a dependency's materialized path.
    pub fn dependency_path(&self, path: &str) -> PathBuf {
        self.dependencies_root.join(path)
    }
}

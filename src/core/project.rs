//! core::project
//!
//! One node of the dependency graph: the in-memory form of a manifest.
//!
//! # Lifecycle
//!
//! - The root project is discovered by walking up from the working
//!   directory; a missing manifest there is [`PuckError::NoManifestFound`].
//! - Nested projects are loaded from a dependency's directory. Their
//!   manifest is optional, and they share the root's dependency directory.

use std::path::{Path, PathBuf};

use crate::core::dependency::Dependency;
use crate::core::manifest::Manifest;
use crate::core::paths::{find_project_root, ProjectPaths};
use crate::core::types::{CommandLine, CommandTable};
use crate::error::PuckError;

/// A project and its declared dependencies.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    paths: ProjectPaths,
    dependencies: Vec<Dependency>,
    commands: CommandTable,
}

impl Project {
    /// Find and load the root project enclosing `start`.
    ///
    /// Searches `start` and its parents, stopping at the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`PuckError::NoManifestFound`] if no `Package.json` is found.
    pub fn discover(start: &Path) -> Result<Self, PuckError> {
        let home = dirs::home_dir();
        Self::discover_within(start, home.as_deref())
    }

    /// Like [`Project::discover`], with an explicit search boundary.
    pub fn discover_within(start: &Path, boundary: Option<&Path>) -> Result<Self, PuckError> {
        let start = absolute(start)?;
        let location =
            find_project_root(&start, boundary).ok_or(PuckError::NoManifestFound { start })?;
        Self::load_root(location)
    }

    /// Load the root project at exactly `location`.
    ///
    /// # Errors
    ///
    /// Returns [`PuckError::NoManifestFound`] if `location` has no manifest.
    pub fn load_root(location: PathBuf) -> Result<Self, PuckError> {
        let location = absolute(&location)?;
        let probe = ProjectPaths::new(location.clone(), None);
        let manifest = Manifest::load(&probe.manifest_path())?.ok_or_else(|| {
            PuckError::NoManifestFound {
                start: location.clone(),
            }
        })?;

        let name = location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.display().to_string());
        let dependencies_root = manifest.dependencies_dir.clone();
        Ok(Self::from_manifest(
            name,
            ProjectPaths::new(location, dependencies_root),
            manifest,
        ))
    }

    /// Load a dependency's project. A missing manifest yields an empty project.
    pub fn load_nested(
        location: PathBuf,
        dependencies_root: PathBuf,
        name: String,
    ) -> Result<Self, PuckError> {
        let paths = ProjectPaths::new(location, Some(dependencies_root));
        let manifest = Manifest::load(&paths.manifest_path())?.unwrap_or_default();
        Ok(Self::from_manifest(name, paths, manifest))
    }

    /// Build a project from an already-parsed manifest.
    pub fn from_manifest(name: String, paths: ProjectPaths, manifest: Manifest) -> Self {
        let dependencies = manifest
            .dependencies
            .into_iter()
            .map(|decl| Dependency::new(decl, paths.dependencies_root()))
            .collect();
        Self {
            name,
            paths,
            dependencies,
            commands: manifest.commands,
        }
    }

    /// Display name: the directory name for the root, the dependency path otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The project directory.
    pub fn location(&self) -> &Path {
        self.paths.location()
    }

    /// Where this project's dependencies are materialized.
    pub fn dependencies_root(&self) -> &Path {
        self.paths.dependencies_root()
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut [Dependency] {
        &mut self.dependencies
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// The handler for `name`, if this project has one.
    pub fn command(&self, name: &str) -> Option<&CommandLine> {
        self.commands.get(name)
    }

    /// Add or replace command handlers.
    pub fn merge_commands(&mut self, overrides: &CommandTable) {
        self.commands
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

fn absolute(path: &Path) -> Result<PathBuf, PuckError> {
    std::path::absolute(path).map_err(|source| PuckError::Io {
        path: path.to_path_buf(),
        source,
    })
}

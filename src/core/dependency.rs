//! core::dependency
//!
//! One declared edge of the dependency graph.
//!
//! # Identity
//!
//! Two declarations that resolve to the same directory are either the same
//! dependency reached twice (a diamond) or a conflict. [`Identity`] is the
//! comparison used to tell them apart: URL sets must intersect and the
//! version selector, env and command overrides must all be equal. Path
//! equality alone never makes two declarations the same.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::manifest::DependencyDecl;
use crate::core::project::Project;
use crate::core::types::{CommandTable, EnvMap, Source, VersionSelector};
use crate::error::PuckError;

/// A dependency of a project, plus its lazily loaded nested project.
#[derive(Debug, Clone)]
pub struct Dependency {
    source: Source,
    path: String,
    full_path: PathBuf,
    selector: VersionSelector,
    dev: bool,
    env: EnvMap,
    commands: CommandTable,
    project: Option<Project>,
}

impl Dependency {
    /// Create a dependency materialized under `dependencies_root`.
    pub fn new(decl: DependencyDecl, dependencies_root: &Path) -> Self {
        Self {
            full_path: dependencies_root.join(&decl.path),
            source: decl.source,
            path: decl.path,
            selector: decl.selector,
            dev: decl.dev,
            env: decl.env,
            commands: decl.commands,
            project: None,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Directory name under the dependency directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute directory the dependency is checked out into.
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn selector(&self) -> &VersionSelector {
        &self.selector
    }

    pub fn is_dev(&self) -> bool {
        self.dev
    }

    /// Environment contributed to this dependency and its descendants.
    pub fn env(&self) -> &EnvMap {
        &self.env
    }

    /// Command handlers injected into the nested project.
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Whether the dependency directory exists.
    pub fn is_materialized(&self) -> bool {
        self.full_path.is_dir()
    }

    /// Snapshot of everything that decides whether two declarations are the same.
    pub fn identity(&self) -> Identity {
        Identity {
            path: self.full_path.clone(),
            source: self.source.clone(),
            selector: self.selector.clone(),
            env: self.env.clone(),
            commands: self.commands.clone(),
        }
    }

    /// Load the nested project, reusing an earlier load.
    ///
    /// # Errors
    ///
    /// - [`PuckError::MissingDependency`] if the directory does not exist
    /// - Manifest errors from the nested `Package.json`
    pub fn load_project(&mut self, dependencies_root: &Path) -> Result<&mut Project, PuckError> {
        if self.project.is_none() {
            self.project = Some(self.read_project(dependencies_root)?);
        }
        self.project
            .as_mut()
            .ok_or_else(|| PuckError::MissingDependency {
                name: self.path.clone(),
                path: self.full_path.clone(),
            })
    }

    /// Load the nested project again, replacing any earlier load.
    ///
    /// Used after fetching, when the manifest may have changed.
    pub fn reload_project(&mut self, dependencies_root: &Path) -> Result<&mut Project, PuckError> {
        self.project = None;
        self.load_project(dependencies_root)
    }

    fn read_project(&self, dependencies_root: &Path) -> Result<Project, PuckError> {
        if !self.is_materialized() {
            return Err(PuckError::MissingDependency {
                name: self.path.clone(),
                path: self.full_path.clone(),
            });
        }
        let mut project = Project::load_nested(
            self.full_path.clone(),
            dependencies_root.to_path_buf(),
            self.path.clone(),
        )?;
        project.merge_commands(&self.commands);
        Ok(project)
    }
}

/// Owned snapshot of a dependency's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    path: PathBuf,
    source: Source,
    selector: VersionSelector,
    env: EnvMap,
    commands: CommandTable,
}

impl Identity {
    /// Absolute materialized path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn selector(&self) -> &VersionSelector {
        &self.selector
    }

    /// True if both describe the same dependency.
    ///
    /// URL sets must intersect; selector, env and command overrides must be
    /// equal. The path is not part of the comparison.
    pub fn same_as(&self, other: &Identity) -> bool {
        self.source.overlaps(&other.source)
            && self.selector == other.selector
            && self.env == other.env
            && self.commands == other.commands
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` ({}, {}", self.path.display(), self.source, self.selector)?;
        if !self.env.is_empty() {
            let keys: Vec<&str> = self.env.keys().map(String::as_str).collect();
            write!(f, ", env {}", keys.join(","))?;
        }
        if !self.commands.is_empty() {
            let names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
            write!(f, ", commands {}", names.join(","))?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CommandLine, TagPattern};

    fn decl(urls: &[&str]) -> DependencyDecl {
        DependencyDecl {
            source: Source::git(urls.iter().copied()).unwrap(),
            path: "lib".into(),
            selector: VersionSelector::new(Some(TagPattern::new("v1.*").unwrap()), None),
            dev: false,
            env: EnvMap::new(),
            commands: CommandTable::new(),
        }
    }

    fn dep(decl: DependencyDecl) -> Dependency {
        Dependency::new(decl, Path::new("/work/deps"))
    }

    mod identity {
        use super::*;

        #[test]
        fn same_when_urls_intersect() {
            let a = dep(decl(&["https://a/lib.git", "https://m/lib.git"])).identity();
            let b = dep(decl(&["https://m/lib.git"])).identity();
            assert!(a.same_as(&b));
        }

        #[test]
        fn different_urls_differ() {
            let a = dep(decl(&["https://a/lib.git"])).identity();
            let b = dep(decl(&["https://b/lib.git"])).identity();
            assert_eq!(a.path(), b.path());
            assert!(!a.same_as(&b));
        }

        #[test]
        fn selector_env_and_commands_all_count() {
            let base = decl(&["https://a/lib.git"]);
            let a = dep(base.clone()).identity();

            let mut other = base.clone();
            other.selector = VersionSelector::new(None, Some("main".into()));
            assert!(!a.same_as(&dep(other).identity()));

            let mut other = base.clone();
            other.env.insert("CC".into(), "clang".into());
            assert!(!a.same_as(&dep(other).identity()));

            let mut other = base;
            other
                .commands
                .insert("build".into(), CommandLine::Shell("make".into()));
            assert!(!a.same_as(&dep(other).identity()));
        }

        #[test]
        fn dev_flag_is_not_identity() {
            let mut dev = decl(&["https://a/lib.git"]);
            dev.dev = true;
            assert!(dep(dev)
                .identity()
                .same_as(&dep(decl(&["https://a/lib.git"])).identity()));
        }

        #[test]
        fn display_mentions_path_and_selector() {
            let shown = dep(decl(&["https://a/lib.git"])).identity().to_string();
            assert!(shown.contains("/work/deps/lib"));
            assert!(shown.contains("tag v1.*"));
        }
    }

    mod loading {
        use super::*;
        use tempfile::TempDir;

        #[test]
        fn missing_directory_is_missing_dependency() {
            let temp = TempDir::new().unwrap();
            let mut d = Dependency::new(decl(&["https://a/lib.git"]), temp.path());
            let err = d.load_project(temp.path()).unwrap_err();
            assert!(matches!(err, PuckError::MissingDependency { .. }));
        }

        #[test]
        fn overrides_are_merged_into_nested_commands() {
            let temp = TempDir::new().unwrap();
            std::fs::create_dir_all(temp.path().join("lib")).unwrap();
            std::fs::write(
                temp.path().join("lib/Package.json"),
                r#"{ "commands": { "build": "make", "test": "make check" } }"#,
            )
            .unwrap();

            let mut d = decl(&["https://a/lib.git"]);
            d.commands
                .insert("build".into(), CommandLine::Shell("cmake --build .".into()));
            let mut d = Dependency::new(d, temp.path());

            let project = d.load_project(temp.path()).unwrap();
            assert_eq!(
                project.command("build"),
                Some(&CommandLine::Shell("cmake --build .".into()))
            );
            assert_eq!(
                project.command("test"),
                Some(&CommandLine::Shell("make check".into()))
            );
        }

        #[test]
        fn reload_replaces_the_project() {
            let temp = TempDir::new().unwrap();
            let manifest = temp.path().join("lib/Package.json");
            std::fs::create_dir_all(temp.path().join("lib")).unwrap();
            std::fs::write(&manifest, r#"{ "commands": { "a": "true" } }"#).unwrap();

            let mut d = Dependency::new(decl(&["https://a/lib.git"]), temp.path());
            assert!(d.load_project(temp.path()).unwrap().command("a").is_some());

            std::fs::write(&manifest, r#"{ "commands": { "b": "true" } }"#).unwrap();
            // Cached load keeps the old manifest.
            assert!(d.load_project(temp.path()).unwrap().command("b").is_none());
            // A forced reload sees the new one.
            let reloaded = d.reload_project(temp.path()).unwrap();
            assert!(reloaded.command("a").is_none());
            assert!(reloaded.command("b").is_some());
        }
    }
}

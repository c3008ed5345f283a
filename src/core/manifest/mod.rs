//! core::manifest
//!
//! Loading and validating `Package.json`.
//!
//! # Overview
//!
//! [`schema`] describes the serialized document. This module turns it into a
//! validated [`Manifest`], mapping both dependency serializations onto one
//! [`DependencyDecl`] so the rest of the crate never sees the difference.
//!
//! # Example
//!
//! ```
//! use puck::core::manifest::Manifest;
//! use puck::core::types::VersionSelector;
//! use std::path::Path;
//!
//! let manifest = Manifest::parse(
//!     r#"{ "dependencies": [ { "https://example.com/lib.git": "v1.*" } ] }"#,
//!     Path::new("Package.json"),
//! )
//! .unwrap();
//!
//! let decl = &manifest.dependencies[0];
//! assert_eq!(decl.path, "lib");
//! assert!(matches!(decl.selector, VersionSelector::Pattern(_)));
//! ```

pub mod schema;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::derive_path;
use crate::core::types::{
    CommandLine, CommandTable, EnvMap, Source, TagPattern, TypeError, VersionSelector,
};
use schema::{DependencySpec, LongSpec, ManifestDoc, RepoSpec};

/// Errors from manifest loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError { path: PathBuf, source: io::Error },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid dependency in '{path}': {message}")]
    InvalidDependency { path: PathBuf, message: String },

    #[error("command '{name}' in '{path}' has an empty argument list")]
    EmptyCommand { path: PathBuf, name: String },
}

/// A validated manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// Dependency declarations, in manifest order.
    pub dependencies: Vec<DependencyDecl>,
    /// Command handlers.
    pub commands: CommandTable,
    /// Dependency directory override, as written.
    pub dependencies_dir: Option<PathBuf>,
}

/// One validated dependency declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyDecl {
    pub source: Source,
    /// Materialized directory name, derived from the primary URL if not given.
    pub path: String,
    pub selector: VersionSelector,
    pub dev: bool,
    pub env: EnvMap,
    pub commands: CommandTable,
}

impl Manifest {
    /// Load a manifest file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Option<Self>, ManifestError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ManifestError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        Self::parse(&contents, path).map(Some)
    }

    /// Parse manifest contents. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ManifestError> {
        let doc: ManifestDoc =
            serde_json::from_str(contents).map_err(|e| ManifestError::ParseError {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_doc(doc, origin)
    }

    fn from_doc(doc: ManifestDoc, origin: &Path) -> Result<Self, ManifestError> {
        let invalid = |message: String| ManifestError::InvalidDependency {
            path: origin.to_path_buf(),
            message,
        };

        let dependencies = doc
            .dependencies
            .into_iter()
            .map(|spec| DependencyDecl::from_spec(spec).map_err(&invalid))
            .collect::<Result<Vec<_>, _>>()?;

        let tables = std::iter::once(&doc.commands).chain(dependencies.iter().map(|d| &d.commands));
        for table in tables {
            if let Some(name) = empty_command(table) {
                return Err(ManifestError::EmptyCommand {
                    path: origin.to_path_buf(),
                    name: name.to_string(),
                });
            }
        }

        Ok(Self {
            dependencies,
            commands: doc.commands,
            dependencies_dir: doc.dependencies_dir,
        })
    }
}

impl DependencyDecl {
    /// Build a declaration from either serialization.
    fn from_spec(spec: DependencySpec) -> Result<Self, String> {
        let long = match spec {
            DependencySpec::Long(long) => long,
            DependencySpec::Short { url, pattern } => LongSpec {
                repo: RepoSpec::Url(url),
                tag: Some(pattern),
                ..LongSpec::default()
            },
        };

        let source = source_from_repo(long.repo)?;
        let pattern = long
            .tag
            .map(TagPattern::new)
            .transpose()
            .map_err(|e| e.to_string())?;
        let path = match long.path {
            Some(path) => validate_path(path)?,
            None => validate_path(derive_path(source.primary_url()))?,
        };

        Ok(Self {
            path,
            selector: VersionSelector::new(pattern, long.reference),
            dev: long.dev,
            env: long.env,
            commands: long.commands,
            source,
        })
    }
}

fn source_from_repo(repo: RepoSpec) -> Result<Source, String> {
    let urls = match repo {
        RepoSpec::Url(url) => vec![url],
        RepoSpec::Mirrors(urls) => urls,
        RepoSpec::Typed(map) => {
            let mut entries = map.into_iter();
            match (entries.next(), entries.next()) {
                (Some((kind, urls)), None) if kind == "git" => urls.into_vec(),
                (Some((kind, _)), None) => {
                    return Err(format!("unknown repository type '{kind}'"))
                }
                _ => {
                    return Err(
                        "repo object must have exactly one \"<type>\": <url> pair".to_string()
                    )
                }
            }
        }
    };

    Source::git(urls.into_iter().map(expand_home))
        .map_err(|e: TypeError| e.to_string())
}

/// Expand a leading `~/` in local repository paths.
fn expand_home(url: String) -> String {
    match (url.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => url,
    }
}

fn empty_command(commands: &CommandTable) -> Option<&str> {
    commands
        .iter()
        .find(|(_, line)| matches!(line, CommandLine::Argv(args) if args.is_empty()))
        .map(|(name, _)| name.as_str())
}

/// A materialized path must name a directory strictly below the dependency
/// directory. Trailing separators are dropped; `.`, `..` and empty segments
/// are refused anywhere.
fn validate_path(path: String) -> Result<String, String> {
    let trimmed = path.trim_end_matches(['/', '\\']);
    let candidate = Path::new(trimmed);
    let confined = !trimmed.is_empty()
        && !candidate.is_absolute()
        && trimmed
            .split(['/', '\\'])
            .all(|segment| !matches!(segment, "" | "." | ".."))
        && candidate
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)));
    if !confined {
        return Err(format!(
            "dependency path '{path}' must name a directory inside the dependency directory"
        ));
    }
    Ok(trimmed.to_string())
}

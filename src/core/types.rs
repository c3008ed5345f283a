//! core::types
//!
//! Strong types for manifest-level concepts.
//!
//! # Types
//!
//! - [`Source`] - Where a dependency is fetched from
//! - [`TagPattern`] - Validated tag glob, with the latest-tag policy
//! - [`VersionSelector`] - Tag pattern or fixed reference
//! - [`CommandLine`] - A command handler from a manifest
//!
//! # Examples
//!
//! ```
//! use puck::core::types::TagPattern;
//!
//! let pattern = TagPattern::new("v1.*").unwrap();
//! let tags = ["v1.0.0", "v1.2.0", "v1.10.0", "v2.0.0"].map(String::from);
//!
//! // Plain string ordering, not semantic versioning.
//! assert_eq!(pattern.latest(&tags), Some("v1.2.0"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variables, ordered for deterministic comparison and output.
pub type EnvMap = BTreeMap<String, String>;

/// Command handlers keyed by command name.
pub type CommandTable = BTreeMap<String, CommandLine>;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid tag pattern '{pattern}': {message}")]
    InvalidTagPattern { pattern: String, message: String },

    #[error("invalid repository url: {0}")]
    InvalidUrl(String),
}

/// Where a dependency's repository lives.
///
/// Closed over the supported repository kinds. Git is the only kind today;
/// new kinds are added as variants, not looked up by name at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    /// A Git repository reachable at any of `urls` (primary first, then mirrors).
    Git { urls: Vec<String> },
}

impl Source {
    /// Create a Git source from one or more URLs.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidUrl` if no URL is given or any URL is blank.
    pub fn git<I, S>(urls: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.is_empty() {
            return Err(TypeError::InvalidUrl(
                "at least one repository url is required".into(),
            ));
        }
        if let Some(blank) = urls.iter().find(|u| u.trim().is_empty()) {
            return Err(TypeError::InvalidUrl(format!("'{blank}' is blank")));
        }
        Ok(Source::Git { urls })
    }

    /// All URLs, primary first.
    pub fn urls(&self) -> &[String] {
        match self {
            Source::Git { urls } => urls,
        }
    }

    /// The URL used to derive default paths and for display.
    pub fn primary_url(&self) -> &str {
        // Construction guarantees at least one url.
        self.urls().first().map(String::as_str).unwrap_or_default()
    }

    /// True if both sources are the same kind and share at least one URL.
    pub fn overlaps(&self, other: &Source) -> bool {
        match (self, other) {
            (Source::Git { urls: a }, Source::Git { urls: b }) => a.iter().any(|u| b.contains(u)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary_url())
    }
}

/// A validated tag glob, e.g. `v1.*`.
///
/// Matching follows `git tag --list` semantics: `*` also matches `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPattern(glob::Pattern);

impl TagPattern {
    /// Parse a tag glob.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTagPattern` for empty or malformed globs.
    pub fn new(pattern: impl AsRef<str>) -> Result<Self, TypeError> {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Err(TypeError::InvalidTagPattern {
                pattern: pattern.to_string(),
                message: "pattern cannot be empty".into(),
            });
        }
        glob::Pattern::new(pattern)
            .map(TagPattern)
            .map_err(|e| TypeError::InvalidTagPattern {
                pattern: pattern.to_string(),
                message: e.msg.to_string(),
            })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check a single tag against the pattern.
    pub fn matches(&self, tag: &str) -> bool {
        self.0.matches(tag)
    }

    /// Pick the tag to check out from `tags`.
    ///
    /// This is the lexicographic maximum of the matching tag strings. It is
    /// deliberately not version-aware: `v1.2.0` beats `v1.10.0`.
    pub fn latest<'a>(&self, tags: &'a [String]) -> Option<&'a str> {
        tags.iter()
            .map(String::as_str)
            .filter(|tag| self.matches(tag))
            .max()
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a dependency's version is chosen after fetching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSelector {
    /// Check out the latest tag matching the pattern.
    Pattern(TagPattern),
    /// Check out a commit, branch or tag; `None` means the default branch.
    Reference(Option<String>),
}

impl VersionSelector {
    /// Build a selector from the two manifest fields. A pattern wins over a
    /// reference when both are present.
    pub fn new(pattern: Option<TagPattern>, reference: Option<String>) -> Self {
        match pattern {
            Some(pattern) => VersionSelector::Pattern(pattern),
            None => VersionSelector::Reference(reference.filter(|r| !r.is_empty())),
        }
    }
}

impl Default for VersionSelector {
    fn default() -> Self {
        VersionSelector::Reference(None)
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSelector::Pattern(pattern) => write!(f, "tag {pattern}"),
            VersionSelector::Reference(Some(reference)) => write!(f, "ref {reference}"),
            VersionSelector::Reference(None) => f.write_str("default branch"),
        }
    }
}

/// A command handler declared in a manifest.
///
/// A string runs through the shell; an array runs the program directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandLine {
    /// Shell-interpreted command line, e.g. `"make && make install"`.
    Shell(String),
    /// Program and arguments, run without a shell.
    Argv(Vec<String>),
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Shell(line) => f.write_str(line),
            CommandLine::Argv(args) => f.write_str(&args.join(" ")),
        }
    }
}

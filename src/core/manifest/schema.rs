//! core::manifest::schema
//!
//! Serialized shape of `Package.json`.
//!
//! # Example
//!
//! ```json
//! {
//!   "dependencies": [
//!     { "https://github.com/mcinglis/libtypes.git": "v2.*" },
//!     {
//!       "repo": ["https://github.com/mcinglis/libmacro.git",
//!                "https://mirror.example/libmacro.git"],
//!       "path": "macro",
//!       "ref": "develop",
//!       "dev": true,
//!       "env": { "CC": "clang" },
//!       "commands": { "build": "make -C $DEPS_DIR/macro" }
//!     }
//!   ],
//!   "commands": { "build": "make" },
//!   "dependencies_dir": "deps"
//! }
//! ```
//!
//! Unknown top-level keys are ignored so manifests can carry metadata for
//! other tools. Unknown keys inside a long-form dependency are rejected.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::types::{CommandTable, EnvMap};

/// The whole manifest document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManifestDoc {
    /// Declared dependencies, in order.
    pub dependencies: Vec<DependencySpec>,

    /// Command handlers for this project.
    pub commands: CommandTable,

    /// Override for the dependency directory (root project only).
    pub dependencies_dir: Option<PathBuf>,
}

/// One entry of the `dependencies` array, in either serialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub enum DependencySpec {
    /// `{ "repo": ..., "path": ..., ... }`
    Long(LongSpec),
    /// `{ "<url>": "<tag pattern>" }`
    Short { url: String, pattern: String },
}

impl TryFrom<Map<String, Value>> for DependencySpec {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if map.contains_key("repo") {
            return serde_json::from_value(Value::Object(map))
                .map(DependencySpec::Long)
                .map_err(|e| format!("invalid dependency: {e}"));
        }

        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((url, Value::String(pattern))), None) => Ok(DependencySpec::Short { url, pattern }),
            (Some((url, _)), None) => Err(format!(
                "short-form dependency '{url}' must map to a tag pattern string"
            )),
            _ => Err(
                "dependency must have a \"repo\" field, or be a single {\"<url>\": \"<tag pattern>\"} pair"
                    .to_string(),
            ),
        }
    }
}

/// Long-form dependency declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LongSpec {
    /// Repository location(s).
    pub repo: RepoSpec,

    /// Directory name under the dependency directory.
    #[serde(default)]
    pub path: Option<String>,

    /// Tag glob; wins over `ref`.
    #[serde(default)]
    pub tag: Option<String>,

    /// Commit, branch or tag to check out.
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,

    /// Only needed to develop the declaring project.
    #[serde(default)]
    pub dev: bool,

    /// Extra environment for commands run under this dependency.
    #[serde(default)]
    pub env: EnvMap,

    /// Command handlers injected into the dependency's own table.
    #[serde(default)]
    pub commands: CommandTable,
}

/// The `repo` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RepoSpec {
    /// A single Git URL.
    Url(String),
    /// A Git URL followed by mirrors.
    Mirrors(Vec<String>),
    /// `{ "<kind>": <url or mirrors> }`, e.g. `{ "git": "..." }`.
    Typed(BTreeMap<String, UrlList>),
}

impl Default for RepoSpec {
    fn default() -> Self {
        RepoSpec::Url(String::new())
    }
}

/// One URL or several.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UrlList {
    One(String),
    Many(Vec<String>),
}

impl UrlList {
    /// Flatten into a vector.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            UrlList::One(url) => vec![url],
            UrlList::Many(urls) => urls,
        }
    }
}

//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! interactive = true
//!
//! [update]
//! verify = true
//! dev = true
//!
//! [execute]
//! check = false
//! dev = true
//! ```

use serde::{Deserialize, Serialize};

/// Global configuration (user scope).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Prompt before destructive actions when attached to a terminal
    pub interactive: Option<bool>,

    /// `puck update` defaults
    pub update: Option<UpdateDefaults>,

    /// `puck execute` defaults
    pub execute: Option<ExecuteDefaults>,
}

/// Update command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateDefaults {
    /// Verify the signature of tags chosen by a pattern
    pub verify: Option<bool>,

    /// Include dev-only dependencies of the root project
    pub dev: Option<bool>,
}

/// Execute command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExecuteDefaults {
    /// Abort on the first failing command
    pub check: Option<bool>,

    /// Include dev-only dependencies of the root project
    pub dev: Option<bool>,
}

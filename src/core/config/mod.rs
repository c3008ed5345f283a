//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$PUCK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/puck/config.toml`
//! 3. `~/.puck/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use puck::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("verify tags: {}", config.verify_tags());
//! ```

pub mod schema;

pub use schema::{ExecuteDefaults, GlobalConfig, UpdateDefaults};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// A missing config file is not an error (defaults are used).
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::locate(|key| std::env::var(key).ok(), dirs::home_dir());
        match path {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    ///
    /// `env` looks up environment variables; `home` is the user's home.
    pub fn locate(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
        let candidates = [
            env("PUCK_CONFIG").map(PathBuf::from),
            env("XDG_CONFIG_HOME").map(|xdg| PathBuf::from(xdg).join("puck/config.toml")),
            home.map(|home| home.join(".puck/config.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.is_file())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Check if interactive prompts are enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Check if tags chosen by a pattern are verified.
    ///
    /// Defaults to `true` if not configured.
    pub fn verify_tags(&self) -> bool {
        self.global
            .update
            .as_ref()
            .and_then(|u| u.verify)
            .unwrap_or(true)
    }

    /// Check if `update` includes dev-only dependencies.
    ///
    /// Defaults to `true` if not configured.
    pub fn update_dev(&self) -> bool {
        self.global
            .update
            .as_ref()
            .and_then(|u| u.dev)
            .unwrap_or(true)
    }

    /// Check if `execute` aborts on failing commands.
    ///
    /// Defaults to `false` if not configured.
    pub fn execute_check(&self) -> bool {
        self.global
            .execute
            .as_ref()
            .and_then(|e| e.check)
            .unwrap_or(false)
    }

    /// Check if `execute` includes dev-only dependencies.
    ///
    /// Defaults to `true` if not configured.
    pub fn execute_dev(&self) -> bool {
        self.global
            .execute
            .as_ref()
            .and_then(|e| e.dev)
            .unwrap_or(true)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

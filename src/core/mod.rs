//! core
//!
//! Domain types, manifests and configuration for Puck.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Source, TagPattern, VersionSelector, CommandLine
//! - [`paths`] - Manifest discovery and dependency directory layout
//! - [`manifest`] - `Package.json` schema and validation
//! - [`dependency`] - One declared edge, and its identity
//! - [`project`] - One node: a loaded manifest and its dependencies
//! - [`config`] - User configuration schema and loading
//!
//! # Design Principles
//!
//! - Manifests are validated once, at load time
//! - Short and long dependency forms share one construction path
//! - A dependency exclusively owns its lazily loaded nested project

pub mod config;
pub mod dependency;
pub mod manifest;
pub mod paths;
pub mod project;
pub mod types;

//! cli
//!
//! Command-line interface layer for puck.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, wires the production
//! collaborators (git, shell, terminal prompts, console output) and hands the
//! root project to [`crate::engine::Walker`].

pub mod args;
pub mod commands;
pub mod logging;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::engine;
use anyhow::{Context as _, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init_tracing(cli.debug);

    let config = Config::load().context("Failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }

    // An explicit --interactive beats the config file.
    let interactive = cli.interactive_flag || (cli.interactive() && config.interactive());
    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive,
        dev: !cli.no_dev,
    };

    commands::dispatch(cli.command, &ctx, &config)
}

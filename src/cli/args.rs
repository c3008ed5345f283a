//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--no-dev` / `-n`: Skip the root project's dev dependencies
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Puck - dependency manager for source-controlled projects
#[derive(Parser, Debug)]
#[command(name = "puck")]
#[command(author, version, about)]
#[command(
    long_about = "Manages a project according to the `Package.json` in its root directory.\n\n\
        Dependencies are separate Git repositories, checked out side by side in the \
        root project's `deps/` directory together with all of their own dependencies."
)]
pub struct Cli {
    /// Run as if puck was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip dependencies marked `"dev": true` in the root project
    #[arg(short = 'n', long, global = true)]
    pub no_dev: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every dependency and check out its selected version
    #[command(
        name = "update",
        visible_alias = "u",
        long_about = "Fetch every dependency and check out its selected version.\n\n\
            Dependencies are cloned into the root project's `deps/` directory (or fetched \
            if already there), then moved to the lexicographically greatest tag matching \
            their `tag` pattern, or to their `ref` (default branch if neither is given). \
            The same happens for the dependencies of every dependency.",
        after_help = "\
EXAMPLES:
    # Fetch and check out everything
    puck update

    # Skip signature verification of selected tags
    puck update --no-verify

    # Leave out the root project's dev dependencies
    puck --no-dev update"
    )]
    Update {
        /// Do not `git tag --verify` the tag chosen for a tag pattern
        #[arg(short = 'f', long)]
        no_verify: bool,
    },

    /// Run a named command in every dependency
    #[command(
        name = "execute",
        visible_alias = "x",
        long_about = "Run a named command in every dependency, exactly once each.\n\n\
            The dependency tree is walked depth-first from the root project; a dependency's \
            own dependencies run before it. A project's handler for the command is the \
            matching entry of the `commands` object in its `Package.json`. Projects without \
            one are reported and skipped.\n\n\
            Commands run in the project's directory with the environment of every \
            enclosing dependency's `env`, plus `DEPS_DIR` pointing at the root's \
            dependency directory.",
        after_help = "\
EXAMPLES:
    # Build every dependency, then the project itself
    puck execute build --root

    # Stop at the first failure
    puck x test --check

    # Pass extra environment to every handler
    puck execute build --env CC=clang --env CFLAGS=-O2"
    )]
    Execute {
        /// Name of the command to run
        command: String,

        /// Fail on the first handler that exits non-zero
        #[arg(short, long)]
        check: bool,

        /// Also run the command for the root project, last
        #[arg(short, long)]
        root: bool,

        /// Extra environment for every handler (repeatable)
        #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
        env: Vec<(String, String)>,
    },

    /// Remove the root project's dependency directories
    #[command(
        name = "wipe",
        visible_alias = "w",
        long_about = "Remove each of the root project's dependency directories, \
            asking for confirmation on each one.\n\n\
            Only the root project's own dependencies are considered. Run `puck update` \
            to bring them back.",
        after_help = "\
EXAMPLES:
    # Confirm each removal
    puck wipe

    # Remove without asking
    puck wipe --force"
    )]
    Wipe {
        /// Do not ask before removing each directory
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    puck completion bash > ~/.local/share/bash-completion/completions/puck

    # Zsh
    puck completion zsh > ~/.zfunc/_puck

    # Fish
    puck completion fish > ~/.config/fish/completions/puck.fish

    # PowerShell
    puck completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parse a `KEY=VALUE` pair. The value may contain `=` and may be empty.
fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

//! execute command - Run a named command across the dependency tree

use crate::core::config::Config;
use crate::engine::{Context, ExecuteOptions, Walker};
use crate::git::GitProvider;
use crate::process::ShellInvoker;
use crate::ui::TerminalPrompter;
use anyhow::Result;

/// Run `command` in every dependency, and in the root with `root`.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `config` - Loaded configuration
/// * `command` - Handler name to look up in each `commands` table
/// * `check` - Abort on the first non-zero exit
/// * `root` - Also run the root project's handler, last
/// * `env` - Extra `KEY=VALUE` pairs for every handler
pub fn execute(
    ctx: &Context,
    config: &Config,
    command: &str,
    check: bool,
    root: bool,
    env: Vec<(String, String)>,
) -> Result<()> {
    let mut project = super::load_root(ctx)?;
    let events = super::event_sink(ctx);

    // Execute never fetches or prompts.
    let git = GitProvider::new();
    let invoker = ShellInvoker;
    let prompter = TerminalPrompter::new(ctx.interactive);
    let walker = Walker::new(&git, &invoker, &prompter, &events);

    let options = ExecuteOptions {
        check: check || config.execute_check(),
        include_root: root,
        include_dev: ctx.dev && config.execute_dev(),
        overrides: env.into_iter().collect(),
    };
    walker.execute(&mut project, command, &options)?;
    Ok(())
}

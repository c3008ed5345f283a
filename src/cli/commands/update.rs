//! update command - Fetch dependencies and check out their versions

use crate::core::config::Config;
use crate::engine::{Context, UpdateOptions, Walker};
use crate::git::GitProvider;
use crate::process::ShellInvoker;
use crate::ui::output::{self, Verbosity};
use crate::ui::TerminalPrompter;
use anyhow::Result;

/// Fetch every dependency and check out its selected version.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `config` - Loaded configuration
/// * `no_verify` - Skip tag signature verification
pub fn update(ctx: &Context, config: &Config, no_verify: bool) -> Result<()> {
    let mut project = super::load_root(ctx)?;
    let events = super::event_sink(ctx);

    let git = GitProvider::new();
    let invoker = ShellInvoker;
    let prompter = TerminalPrompter::new(ctx.interactive);
    let walker = Walker::new(&git, &invoker, &prompter, &events);

    let options = UpdateOptions {
        verify: !no_verify && config.verify_tags(),
        include_dev: ctx.dev && config.update_dev(),
    };
    walker.update(&mut project, &options)?;

    output::print(
        format!(
            "Dependencies of {} are up to date in {}",
            project.name(),
            output::format_path(project.dependencies_root(), project.location())
        ),
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    );
    Ok(())
}

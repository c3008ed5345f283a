//! wipe command - Remove dependency directories

use crate::engine::{Context, Walker, WipeOptions};
use crate::git::GitProvider;
use crate::process::ShellInvoker;
use crate::ui::output::{self, Verbosity};
use crate::ui::TerminalPrompter;
use anyhow::Result;

/// Remove the root project's dependency directories.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `force` - Remove without asking
pub fn wipe(ctx: &Context, force: bool) -> Result<()> {
    let project = super::load_root(ctx)?;
    let events = super::event_sink(ctx);

    let git = GitProvider::new();
    let invoker = ShellInvoker;
    let prompter = TerminalPrompter::new(ctx.interactive);
    let walker = Walker::new(&git, &invoker, &prompter, &events);

    let options = WipeOptions {
        force,
        include_dev: ctx.dev,
    };
    let report = walker.wipe(&project, &options)?;

    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let removed = output::count(report.removed.len(), "dependency", "dependencies");
    let message = match (report.removed.len(), report.skipped.len()) {
        (0, 0) => "Nothing to wipe".to_string(),
        (_, 0) => format!("Removed {removed}"),
        (_, kept) => format!("Removed {removed}, kept {kept}"),
    };
    output::print(message, verbosity);
    Ok(())
}

//! engine::walker::execute
//!
//! Run a named command across the graph, dependencies first.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{selected, ExecuteOptions, Walker};
use crate::core::dependency::{Dependency, Identity};
use crate::core::project::Project;
use crate::core::types::EnvMap;
use crate::engine::env;
use crate::engine::trail::{Trail, Visit};
use crate::error::PuckError;
use crate::events::Event;
use crate::process::Invocation;

/// Per-call settings shared by every node.
struct Run<'r> {
    command: &'r str,
    check: bool,
    overrides: &'r EnvMap,
    deps_dir: PathBuf,
}

impl Walker<'_> {
    /// Run `command` in every dependency of `project`.
    ///
    /// A dependency's nested dependencies run before it; siblings run in
    /// manifest order. With `include_root` the root's own handler runs last.
    /// Projects without a handler are reported and skipped. Nothing is
    /// fetched: every dependency must already be on disk.
    ///
    /// # Errors
    ///
    /// - [`PuckError::MissingDependency`] if a dependency directory does not exist
    /// - [`PuckError::DependencyConflict`] / [`PuckError::DependencyCycle`] as for update
    /// - [`PuckError::Process`] if a handler fails under `check`, or cannot be started
    pub fn execute(
        &self,
        project: &mut Project,
        command: &str,
        options: &ExecuteOptions,
    ) -> Result<(), PuckError> {
        let run = Run {
            command,
            check: options.check,
            overrides: &options.overrides,
            deps_dir: project.dependencies_root().to_path_buf(),
        };
        let mut trail = Trail::new();
        self.execute_project(
            project,
            &run,
            &EnvMap::new(),
            options.include_dev,
            options.include_root,
            &mut trail,
        )
    }

    fn execute_project(
        &self,
        project: &mut Project,
        run: &Run<'_>,
        inherited: &EnvMap,
        include_dev: bool,
        run_own: bool,
        trail: &mut Trail,
    ) -> Result<(), PuckError> {
        let deps_root = project.dependencies_root().to_path_buf();
        for dependency in selected(project.dependencies_mut(), include_dev) {
            self.execute_dependency(dependency, &deps_root, run, inherited, trail)?;
        }

        if run_own {
            self.run_handler(project, run, inherited)?;
        }
        Ok(())
    }

    fn execute_dependency(
        &self,
        dependency: &mut Dependency,
        deps_root: &Path,
        run: &Run<'_>,
        inherited: &EnvMap,
        trail: &mut Trail,
    ) -> Result<(), PuckError> {
        let identity = dependency.identity();
        trail.enter(identity.clone(), self.events)?;
        let result = self.execute_entered(dependency, identity, deps_root, run, inherited, trail);
        trail.leave();
        result
    }

    fn execute_entered(
        &self,
        dependency: &mut Dependency,
        identity: Identity,
        deps_root: &Path,
        run: &Run<'_>,
        inherited: &EnvMap,
        trail: &mut Trail,
    ) -> Result<(), PuckError> {
        if trail.check_visited(&identity, self.events)? == Visit::Duplicate {
            debug!(path = dependency.path(), "already executed in this run");
            return Ok(());
        }
        trail.mark_visited(identity);

        if !dependency.is_materialized() {
            self.events.emit(Event::MissingDependency { dependency });
            return Err(PuckError::MissingDependency {
                name: dependency.path().to_string(),
                path: dependency.full_path().to_path_buf(),
            });
        }

        let env = env::layer(inherited, dependency.env());
        let project = dependency.load_project(deps_root)?;
        self.events.emit(Event::LoadProject { project });
        self.execute_project(project, run, &env, false, true, trail)
    }

    fn run_handler(&self, project: &Project, run: &Run<'_>, inherited: &EnvMap) -> Result<(), PuckError> {
        let Some(line) = project.command(run.command) else {
            self.events.emit(Event::NoCommandHandler {
                project,
                command: run.command,
            });
            return Ok(());
        };

        self.events.emit(Event::Execute {
            project,
            command: run.command,
        });

        let env = env::compose(&self.base_env, inherited, run.overrides, &run.deps_dir);
        self.events.emit(Event::Call {
            command: line,
            cwd: project.location(),
        });
        let invocation = Invocation::new(line.clone(), project.location())
            .with_env(env)
            .check(run.check);

        let output = self.invoker.run(&invocation)?;
        if !output.success() {
            debug!(
                project = project.name(),
                status = ?output.status,
                "handler failed, continuing"
            );
        }
        Ok(())
    }
}

//! engine::walker::update
//!
//! Synchronize: fetch, select a version, reload, recurse.

use std::path::Path;

use tracing::debug;

use super::{selected, UpdateOptions, Walker};
use crate::core::dependency::{Dependency, Identity};
use crate::core::project::Project;
use crate::core::types::VersionSelector;
use crate::engine::trail::{Trail, Visit};
use crate::error::PuckError;
use crate::events::Event;

impl Walker<'_> {
    /// Bring every dependency of `project` up to date.
    ///
    /// Each dependency is fetched (cloned if absent), moved to its selected
    /// version, and its nested project reloaded before its own dependencies
    /// are synchronized. Running it twice with no upstream changes leaves
    /// the same trees at the same versions.
    ///
    /// # Errors
    ///
    /// - [`PuckError::DependencyCycle`] before anything is fetched for the cyclic edge
    /// - [`PuckError::DependencyConflict`] before the conflicting declaration is fetched
    /// - [`PuckError::RepoVerification`] if tag verification is on and fails
    /// - [`PuckError::Source`] for clone, fetch or checkout failures
    pub fn update(&self, project: &mut Project, options: &UpdateOptions) -> Result<(), PuckError> {
        let mut trail = Trail::new();
        self.update_project(project, options.include_dev, options.verify, &mut trail)
    }

    fn update_project(
        &self,
        project: &mut Project,
        include_dev: bool,
        verify: bool,
        trail: &mut Trail,
    ) -> Result<(), PuckError> {
        let deps_root = project.dependencies_root().to_path_buf();
        for dependency in selected(project.dependencies_mut(), include_dev) {
            self.update_dependency(dependency, &deps_root, verify, trail)?;
        }
        Ok(())
    }

    fn update_dependency(
        &self,
        dependency: &mut Dependency,
        deps_root: &Path,
        verify: bool,
        trail: &mut Trail,
    ) -> Result<(), PuckError> {
        let identity = dependency.identity();
        trail.enter(identity.clone(), self.events)?;
        let result = self.update_entered(dependency, identity, deps_root, verify, trail);
        trail.leave();
        result
    }

    fn update_entered(
        &self,
        dependency: &mut Dependency,
        identity: Identity,
        deps_root: &Path,
        verify: bool,
        trail: &mut Trail,
    ) -> Result<(), PuckError> {
        if trail.check_visited(&identity, self.events)? == Visit::Duplicate {
            debug!(path = dependency.path(), "already updated in this run");
            return Ok(());
        }

        self.events.emit(Event::Update { dependency });
        self.source
            .fetch_latest(dependency.full_path(), dependency.source())?;
        self.select_version(dependency, verify)?;
        trail.mark_visited(identity);

        let project = dependency.reload_project(deps_root)?;
        self.events.emit(Event::LoadProject { project });
        self.update_project(project, false, verify, trail)
    }

    /// Check out the version the dependency's selector asks for.
    fn select_version(&self, dependency: &Dependency, verify: bool) -> Result<(), PuckError> {
        let path = dependency.full_path();
        let reference = match dependency.selector() {
            VersionSelector::Pattern(pattern) => {
                let tags = self.source.list_tags(path, pattern)?;
                let Some(tag) = pattern.latest(&tags) else {
                    self.events.emit(Event::NoMatchingTags {
                        dependency,
                        pattern,
                    });
                    return Ok(());
                };
                if verify {
                    self.source.verify_tag(path, tag)?;
                }
                tag.to_string()
            }
            VersionSelector::Reference(Some(reference)) => reference.clone(),
            VersionSelector::Reference(None) => self.source.default_branch(path)?,
        };

        self.events.emit(Event::Checkout {
            dependency,
            reference: &reference,
        });
        self.source.checkout(path, &reference)?;
        Ok(())
    }
}

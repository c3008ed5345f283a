//! engine::walker::wipe
//!
//! Remove the root's dependency directories.
//!
//! Wipe is shallow: it never reads nested manifests, so dependencies of
//! dependencies that live elsewhere are left for the next update.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{WipeOptions, Walker};
use crate::core::project::Project;
use crate::error::PuckError;
use crate::events::Event;

/// What a wipe did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WipeReport {
    /// Directories removed.
    pub removed: Vec<PathBuf>,
    /// Directories kept because removal was declined.
    pub skipped: Vec<PathBuf>,
}

impl Walker<'_> {
    /// Remove the directory of each of `project`'s dependencies.
    ///
    /// Without `force` each removal is confirmed through the prompter.
    /// Dependencies that were never materialized are ignored.
    ///
    /// # Errors
    ///
    /// - [`PuckError::Prompt`] if confirmation is needed but cannot be asked
    /// - [`PuckError::Io`] if a directory cannot be removed
    pub fn wipe(&self, project: &Project, options: &WipeOptions) -> Result<WipeReport, PuckError> {
        let mut report = WipeReport::default();

        let selected = project
            .dependencies()
            .iter()
            .filter(|d| options.include_dev || !d.is_dev());

        for dependency in selected {
            let path = dependency.full_path();
            if !path.exists() {
                debug!(path = %path.display(), "not materialized, nothing to wipe");
                continue;
            }

            if !options.force && !self.prompter.confirm_removal(path)? {
                self.events.emit(Event::WipeSkipped { dependency });
                report.skipped.push(path.to_path_buf());
                continue;
            }

            self.events.emit(Event::Wipe { dependency });
            fs::remove_dir_all(path).map_err(|source| PuckError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            report.removed.push(path.to_path_buf());
        }

        Ok(report)
    }
}

//! engine::env
//!
//! Environment composition for executed commands.
//!
//! Layers, lowest precedence first:
//!
//! 1. the base process environment
//! 2. `env` of every ancestor dependency, outermost first
//! 3. `env` of the dependency owning the project
//! 4. caller overrides (`--env KEY=VALUE`)
//! 5. `DEPS_DIR`, the root's dependency directory

use std::ffi::OsString;
use std::path::Path;

use crate::core::paths::DEPS_DIR_ENV;
use crate::core::types::EnvMap;

/// The current process environment as an [`EnvMap`].
pub fn process_env() -> EnvMap {
    from_os_vars(std::env::vars_os())
}

/// Collect the UTF-8 entries of `vars`.
///
/// Entries whose name or value is not valid UTF-8 are left out of the map.
/// Children still receive them, since commands run with the composed map
/// laid over the inherited environment.
pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> EnvMap {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                let key = key.unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
                tracing::debug!(%key, "skipping non-UTF-8 environment variable");
                None
            }
        })
        .collect()
}

/// `inherited` with `own` laid on top.
pub fn layer(inherited: &EnvMap, own: &EnvMap) -> EnvMap {
    let mut env = inherited.clone();
    env.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
    env
}

/// The complete environment for one command invocation.
pub fn compose(base: &EnvMap, dependency: &EnvMap, overrides: &EnvMap, deps_dir: &Path) -> EnvMap {
    let mut env = layer(&layer(base, dependency), overrides);
    env.insert(DEPS_DIR_ENV.to_string(), deps_dir.display().to_string());
    env
}

//! Engine invocations.
//!
//! [`NodeCommand`] is a persistent builder: `with_args` / `with_environment`
//! return a new value and leave the receiver untouched, so a partially
//! configured command can be shared and branched freely.
//!
//! The child sees the ambient environment of this process, snapshotted when
//! the command is resolved, with the accumulated overrides applied on top and
//! the engine bin directory in front of `PATH`.

use singular_node_core::{Error, Layout, Result};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Separator between `PATH` entries on the host platform.
pub const PATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Snapshot of the current process environment. Variables whose name or
/// value is not valid Unicode are left out.
pub fn ambient_environment() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct NodeCommand {
    layout: Layout,
    working_dir: PathBuf,
    args: Vec<OsString>,
    environment: BTreeMap<String, String>,
}

impl NodeCommand {
    /// A command without arguments or environment overrides.
    pub fn new(layout: Layout, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout,
            working_dir: working_dir.into(),
            args: Vec::new(),
            environment: BTreeMap::new(),
        }
    }

    /// Appends `values` after the existing arguments.
    pub fn with_args<I, S>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut next = self.clone();
        next.args
            .extend(values.into_iter().map(|v| v.as_ref().to_os_string()));
        next
    }

    /// Overwrites every key present in `mapping`; other keys are kept.
    /// Overrides always win over the ambient environment.
    pub fn with_environment<I, K, V>(&self, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut next = self.clone();
        next.environment
            .extend(mapping.into_iter().map(|(k, v)| (k.into(), v.into())));
        next
    }

    pub fn in_dir(&self, working_dir: impl Into<PathBuf>) -> Self {
        let mut next = self.clone();
        next.working_dir = working_dir.into();
        next
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The accumulated overrides, without the ambient environment.
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    /// The environment the process is started with: a fresh snapshot of the
    /// ambient environment, then the overrides, then the engine bin directory
    /// put in front of `PATH`.
    pub fn resolved_environment(&self) -> Result<BTreeMap<String, String>> {
        self.resolve_over(ambient_environment())
    }

    fn resolve_over(&self, mut env: BTreeMap<String, String>) -> Result<BTreeMap<String, String>> {
        let bin_dir = absolute(&self.layout.node_bin_dir())?;
        for (key, value) in &self.environment {
            env.insert(override_key(&env, key), value.clone());
        }
        let key = path_key(&env);
        let existing = env.get(&key).cloned().unwrap_or_default();
        env.insert(
            key,
            format!("{}{}{}", bin_dir.display(), PATH_SEPARATOR, existing),
        );
        Ok(env)
    }

    /// Runs the engine and blocks until it exits. A non-zero exit is a
    /// [`Error::ProcessFailure`].
    pub fn execute(&self) -> Result<()> {
        let executable = absolute(&self.layout.node_executable())?;
        let env = self.resolved_environment()?;

        tracing::debug!(
            "exec {} {:?} (cwd: {})",
            executable.display(),
            self.args,
            self.working_dir.display()
        );

        let status = Command::new(&executable)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_clear()
            .envs(&env)
            .status()
            .map_err(|source| Error::ProcessSpawn {
                executable: executable.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::ProcessFailure {
                executable,
                code: status.code(),
            })
        }
    }
}

/// Name of the `PATH` entry. Windows treats variable names case-insensitively
/// and usually spells it `Path`.
fn path_key(env: &BTreeMap<String, String>) -> String {
    override_key(env, "PATH")
}

/// The key `key` lands on in `env`. On Windows an existing entry that differs
/// only in case is reused instead of adding a second one.
fn override_key(env: &BTreeMap<String, String>, key: &str) -> String {
    if cfg!(windows) {
        if let Some(existing) = env.keys().find(|k| k.eq_ignore_ascii_case(key)) {
            return existing.clone();
        }
    }
    key.to_string()
}

pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::filesystem("resolve", path, e))
}

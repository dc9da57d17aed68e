//! Per-project dependency sync and managed-tool invocation.
//!
//! A successful `install` leaves a zero-byte marker in the dependency
//! directory. Build tooling treats the marker as the output of the sync
//! instead of hashing all of `node_modules`, so changes made to that
//! directory by anything else go unnoticed.

use crate::command::{absolute, NodeCommand};
use crate::info_log;
use singular_node_core::package_manager::{DEPENDENCY_DIR, MANIFEST_FILE};
use singular_node_core::{Error, Layout, PackageManager, Result};
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// File name of the sync completion marker.
pub const COMPLETION_MARKER: &str = ".install.executed";

/// `<working_dir>/node_modules/.install.executed`
pub fn completion_marker(working_dir: &Path) -> PathBuf {
    working_dir.join(DEPENDENCY_DIR).join(COMPLETION_MARKER)
}

pub fn is_synced(working_dir: &Path) -> bool {
    completion_marker(working_dir).is_file()
}

/// Files whose contents decide whether a sync is due. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncInputs {
    pub manifest: Option<PathBuf>,
    pub lock_file: Option<PathBuf>,
}

impl SyncInputs {
    pub fn collect(working_dir: &Path, kind: PackageManager) -> Self {
        let present = |name: &str| {
            let path = working_dir.join(name);
            path.is_file().then_some(path)
        };
        Self {
            manifest: present(MANIFEST_FILE),
            lock_file: present(kind.lock_file()),
        }
    }
}

/// Runs `<kind> install <extra_args...>` in `working_dir` with the managed
/// installation of `kind`, then records completion.
pub fn sync_dependencies<S: AsRef<OsStr>>(
    working_dir: &Path,
    layout: &Layout,
    kind: PackageManager,
    extra_args: &[S],
) -> Result<()> {
    let inputs = SyncInputs::collect(working_dir, kind);
    tracing::debug!("Sync inputs for {}: {:?}", working_dir.display(), inputs);
    info_log!("Running {} install in {}", kind, working_dir.display());

    managed_command(kind, layout, working_dir)?
        .with_args(["install"])
        .with_args(extra_args)
        .execute()?;

    mark_synced(working_dir)
}

/// Runs the managed script of `kind` with arbitrary arguments. Overrides in
/// `environment` are applied on top of the ambient environment. No marker is
/// written.
pub fn run_managed<I, K, V, S>(
    kind: PackageManager,
    layout: &Layout,
    working_dir: &Path,
    args: &[S],
    environment: I,
) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    S: AsRef<OsStr>,
{
    managed_command(kind, layout, working_dir)?
        .with_environment(environment)
        .with_args(args)
        .execute()
}

fn managed_command(kind: PackageManager, layout: &Layout, working_dir: &Path) -> Result<NodeCommand> {
    let script = absolute(&layout.managed_script(kind))?;
    Ok(NodeCommand::new(layout.clone(), working_dir).with_args([script]))
}

fn mark_synced(working_dir: &Path) -> Result<()> {
    let dependency_dir = working_dir.join(DEPENDENCY_DIR);
    fs::create_dir_all(&dependency_dir)
        .map_err(|e| Error::filesystem("create", &dependency_dir, e))?;

    let marker = completion_marker(working_dir);
    match OpenOptions::new().write(true).create_new(true).open(&marker) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(Error::filesystem("create", marker, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_path() {
        assert_eq!(
            completion_marker(Path::new("/work/app")),
            PathBuf::from("/work/app/node_modules/.install.executed")
        );
    }

    #[test]
    fn test_collect_inputs_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SyncInputs::collect(dir.path(), PackageManager::Yarn), SyncInputs::default());

        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        let inputs = SyncInputs::collect(dir.path(), PackageManager::Yarn);
        assert_eq!(inputs.manifest, Some(dir.path().join("package.json")));
        assert_eq!(inputs.lock_file, Some(dir.path().join("yarn.lock")));

        let pnpm = SyncInputs::collect(dir.path(), PackageManager::Pnpm);
        assert!(pnpm.manifest.is_some());
        assert_eq!(pnpm.lock_file, None);
    }

    #[test]
    fn test_mark_synced_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_synced(dir.path()));
        mark_synced(dir.path()).unwrap();
        mark_synced(dir.path()).unwrap();
        assert!(is_synced(dir.path()));
        assert_eq!(fs::metadata(completion_marker(dir.path())).unwrap().len(), 0);
    }

    #[test]
    fn test_mark_synced_fails_when_dependency_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEPENDENCY_DIR), "not a directory").unwrap();
        let err = mark_synced(dir.path()).unwrap_err();
        assert!(matches!(err, Error::FilesystemStateFailure { action: "create", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_runs_managed_install_and_writes_marker() {
        use crate::test_support::FakeNode;

        let fake = FakeNode::install(0);
        let layout = fake.layout();
        let project = tempfile::tempdir().unwrap();

        sync_dependencies(project.path(), &layout, PackageManager::Pnpm, &["--frozen-lockfile"])
            .unwrap();

        assert_eq!(
            fake.recorded_args(),
            vec![
                layout.managed_script(PackageManager::Pnpm).display().to_string(),
                "install".to_string(),
                "--frozen-lockfile".to_string(),
            ]
        );
        assert_eq!(fake.recorded_cwd(), project.path().canonicalize().unwrap());
        assert!(is_synced(project.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_sync_writes_no_marker() {
        use crate::test_support::FakeNode;

        let fake = FakeNode::install(1);
        let project = tempfile::tempdir().unwrap();
        let err = sync_dependencies::<&str>(project.path(), &fake.layout(), PackageManager::Npm, &[])
            .unwrap_err();

        assert!(fake.was_invoked());
        assert_eq!(err.exit_code(), Some(1));
        assert!(!is_synced(project.path()));
        assert!(!project.path().join(DEPENDENCY_DIR).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_managed_applies_overrides_and_args() {
        use crate::test_support::FakeNode;

        let fake = FakeNode::install(0);
        let layout = fake.layout();
        run_managed(
            PackageManager::Yarn,
            &layout,
            fake.base_dir(),
            &["run", "build"],
            [("PATH", "/custom/bin")],
        )
        .unwrap();

        assert_eq!(
            fake.recorded_args(),
            vec![
                layout.managed_script(PackageManager::Yarn).display().to_string(),
                "run".to_string(),
                "build".to_string(),
            ]
        );
        assert_eq!(
            fake.recorded_path(),
            format!("{}:/custom/bin", layout.node_bin_dir().display())
        );
        assert!(!is_synced(fake.base_dir()));
    }
}

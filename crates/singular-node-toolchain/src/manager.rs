//! Package-manager bootstrap.
//!
//! npm, yarn and pnpm are installed the same way: clean the kind's prefix
//! directory, then let the npm bundled with the engine install
//! `<kind>@<version>` globally into that prefix.

use crate::command::{absolute, NodeCommand};
use crate::engine::clean_dir;
use crate::info_log;
use singular_node_core::{Layout, PackageManager, Result};
use std::path::PathBuf;

/// What to install: a package-manager kind pinned to one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerInstall {
    pub kind: PackageManager,
    pub version: String,
}

impl ManagerInstall {
    pub fn new(kind: PackageManager, version: impl Into<String>) -> Self {
        Self {
            kind,
            version: version.into(),
        }
    }

    /// npm install argument, e.g. `pnpm@8.6.0`.
    pub fn package_spec(&self) -> String {
        format!("{}@{}", self.kind.name(), self.version)
    }

    pub fn install_dir(&self, layout: &Layout) -> PathBuf {
        layout.manager_install_dir(self.kind)
    }
}

/// Installs `target` with the engine's bundled npm. `runner` supplies layout,
/// working directory and environment; the install arguments are appended to
/// whatever it already carries.
pub fn install_manager(target: &ManagerInstall, runner: &NodeCommand) -> Result<()> {
    let layout = runner.layout();
    let prefix = absolute(&target.install_dir(layout))?;
    let bootstrap = absolute(&layout.bundled_npm_script())?;

    info_log!("Installing {} into {}", target.package_spec(), prefix.display());
    clean_dir(&prefix)?;

    runner
        .with_args([bootstrap.as_os_str()])
        .with_args(["install", "--global", "--no-save", "--prefix"])
        .with_args([prefix.as_os_str()])
        .with_args([target.package_spec()])
        .execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::linux_layout;

    #[test]
    fn test_package_spec() {
        let target = ManagerInstall::new(PackageManager::Yarn, "1.22.19");
        assert_eq!(target.package_spec(), "yarn@1.22.19");
        let layout = linux_layout("/opt/nodejs");
        assert_eq!(target.install_dir(&layout), PathBuf::from("/opt/nodejs/yarn"));
    }

    #[cfg(unix)]
    #[test]
    fn test_install_runs_bundled_npm_with_prefix() {
        use crate::test_support::FakeNode;

        let fake = FakeNode::install(0);
        let layout = fake.layout();
        let stale = layout.manager_install_dir(PackageManager::Pnpm).join("stale.txt");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, "left over").unwrap();

        let target = ManagerInstall::new(PackageManager::Pnpm, "8.6.0");
        install_manager(&target, &NodeCommand::new(layout.clone(), fake.base_dir())).unwrap();

        let prefix = layout.manager_install_dir(PackageManager::Pnpm);
        assert_eq!(
            fake.recorded_args(),
            vec![
                layout.bundled_npm_script().display().to_string(),
                "install".to_string(),
                "--global".to_string(),
                "--no-save".to_string(),
                "--prefix".to_string(),
                prefix.display().to_string(),
                "pnpm@8.6.0".to_string(),
            ]
        );
        assert!(!stale.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_keeps_runner_arguments_first() {
        use crate::test_support::FakeNode;

        let fake = FakeNode::install(0);
        let runner = NodeCommand::new(fake.layout(), fake.base_dir()).with_args(["--no-warnings"]);
        install_manager(&ManagerInstall::new(PackageManager::Npm, "9.8.1"), &runner).unwrap();

        let args = fake.recorded_args();
        assert_eq!(args.first().map(String::as_str), Some("--no-warnings"));
        assert_eq!(args.last().map(String::as_str), Some("npm@9.8.1"));
        assert_eq!(runner.args().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_install_failure_carries_exit_code() {
        use crate::test_support::FakeNode;
        use singular_node_core::Error;

        let fake = FakeNode::install(7);
        let err = install_manager(
            &ManagerInstall::new(PackageManager::Yarn, "1.22.19"),
            &NodeCommand::new(fake.layout(), fake.base_dir()),
        )
        .unwrap_err();
        assert!(fake.was_invoked());
        assert!(matches!(err, Error::ProcessFailure { code: Some(7), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_bootstrap_npm_inherits_ambient_environment() {
        use crate::test_support::FakeNode;

        let fake = FakeNode::install(0);
        std::env::set_var("SINGULAR_NODE_TEST_NPM_CONFIG", "registry");
        install_manager(
            &ManagerInstall::new(PackageManager::Pnpm, "8.6.0"),
            &NodeCommand::new(fake.layout(), fake.base_dir()),
        )
        .unwrap();
        assert_eq!(
            fake.recorded_env("SINGULAR_NODE_TEST_NPM_CONFIG").as_deref(),
            Some("registry")
        );
    }
}

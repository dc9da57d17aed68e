//! Layout for Windows. Executables carry `.exe`, package managers are run
//! through their JavaScript entry scripts, and there is no `bin` directory
//! below the engine root.

use super::{combine, InstallRoots, PlatformLayout};
use crate::package_manager::PackageManager;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsLayout {
    roots: InstallRoots,
}

impl WindowsLayout {
    pub(super) fn new(roots: InstallRoots) -> Self {
        Self { roots }
    }
}

impl PlatformLayout for WindowsLayout {
    fn roots(&self) -> &InstallRoots {
        &self.roots
    }

    fn node_bin_dir(&self) -> PathBuf {
        self.roots.node_install_dir()
    }

    fn node_executable(&self) -> PathBuf {
        combine(&self.node_bin_dir(), &["node.exe"])
    }

    fn bundled_cli_script(&self, script_name: &str) -> PathBuf {
        let cli_script = format!("{}-cli.js", script_name);
        combine(
            &self.roots.node_install_dir(),
            &["node_modules", "npm", "bin", &cli_script],
        )
    }

    fn bundled_npm_script(&self) -> PathBuf {
        self.bundled_cli_script("npm")
    }

    fn bundled_npx_script(&self) -> PathBuf {
        self.bundled_cli_script("npx")
    }

    fn managed_script(&self, kind: PackageManager) -> PathBuf {
        let entry = match kind {
            PackageManager::Npm => "npm-cli.js",
            PackageManager::Yarn => "yarn.js",
            PackageManager::Pnpm => "pnpm.cjs",
        };
        combine(
            &self.roots.manager_install_dir(kind),
            &["node_modules", kind.name(), "bin", entry],
        )
    }
}

//! Layout for Linux and macOS.

use super::{combine, InstallRoots, PlatformLayout};
use crate::package_manager::PackageManager;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixLayout {
    roots: InstallRoots,
}

impl UnixLayout {
    pub(super) fn new(roots: InstallRoots) -> Self {
        Self { roots }
    }
}

impl PlatformLayout for UnixLayout {
    fn roots(&self) -> &InstallRoots {
        &self.roots
    }

    fn node_bin_dir(&self) -> PathBuf {
        combine(&self.roots.node_install_dir(), &["bin"])
    }

    fn node_executable(&self) -> PathBuf {
        combine(&self.node_bin_dir(), &["node"])
    }

    fn bundled_cli_script(&self, script_name: &str) -> PathBuf {
        let cli_script = format!("{}-cli.js", script_name);
        combine(
            &self.roots.node_install_dir(),
            &["lib", "node_modules", "npm", "bin", &cli_script],
        )
    }

    // In the distribution these are symlinks into lib/node_modules/npm/bin.
    fn bundled_npm_script(&self) -> PathBuf {
        combine(&self.node_bin_dir(), &["npm"])
    }

    fn bundled_npx_script(&self) -> PathBuf {
        combine(&self.node_bin_dir(), &["npx"])
    }

    fn managed_script(&self, kind: PackageManager) -> PathBuf {
        combine(&self.roots.manager_install_dir(kind), &["bin", kind.name()])
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::Layout;
    use crate::package_manager::PackageManager;
    use std::path::Path;

    #[test]
    fn test_unix_paths() {
        let layout = Layout::resolve("/opt/nodejs", "Linux").unwrap();
        let node = Path::new("/opt/nodejs/node");
        assert_eq!(layout.node_bin_dir(), node.join("bin"));
        assert_eq!(layout.node_executable(), node.join("bin").join("node"));
        assert_eq!(layout.bundled_npm_script(), node.join("bin").join("npm"));
        assert_eq!(layout.bundled_npx_script(), node.join("bin").join("npx"));
        assert_eq!(
            layout.bundled_cli_script("npx"),
            node.join("lib/node_modules/npm/bin/npx-cli.js")
        );
    }

    #[test]
    fn test_unix_managed_scripts() {
        let layout = Layout::resolve("/opt/nodejs", "Mac OS X").unwrap();
        assert_eq!(
            layout.managed_script(PackageManager::Npm),
            Path::new("/opt/nodejs/npm/bin/npm")
        );
        assert_eq!(
            layout.managed_script(PackageManager::Yarn),
            Path::new("/opt/nodejs/yarn/bin/yarn")
        );
        assert_eq!(
            layout.managed_script(PackageManager::Pnpm),
            Path::new("/opt/nodejs/pnpm/bin/pnpm")
        );
    }
}

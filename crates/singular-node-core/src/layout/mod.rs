//! Platform installation layouts.
//!
//! Every path into the managed tooling is obtained from a [`Layout`], which
//! hides the directory conventions of the two supported platform families:
//!
//! - Unix-like (Linux, macOS): executables under `<root>/bin`, the engine's
//!   npm lives in `lib/node_modules`.
//! - Windows: `node.exe` directly in the engine root, package managers are
//!   started through their JavaScript entry scripts in `node_modules`.
//!
//! The variant is chosen once by [`Layout::resolve`] and never re-evaluated.

mod unix;
mod windows;

pub use unix::UnixLayout;
pub use windows::WindowsLayout;

use crate::error::{Error, Result};
use crate::package_manager::PackageManager;
use std::path::{Path, PathBuf};

/// Directory below the install base that holds the engine.
pub const NODE_DIR: &str = "node";

/// Joins `parts` onto `top` in order. Each part is a single directory or
/// file name; the platform separator is supplied by [`Path::join`].
pub fn combine(top: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(top.to_path_buf(), |acc, part| acc.join(part))
}

/// Install roots shared by both platform families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoots {
    base_dir: PathBuf,
}

impl InstallRoots {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The engine root. It directly contains `bin`, `lib` / `node_modules`
    /// without a version directory in between.
    pub fn node_install_dir(&self) -> PathBuf {
        combine(&self.base_dir, &[NODE_DIR])
    }

    /// The `--prefix` directory a package manager is installed into.
    pub fn manager_install_dir(&self, kind: PackageManager) -> PathBuf {
        combine(&self.base_dir, &[kind.install_dir_name()])
    }
}

/// The paths that differ between platform families.
pub trait PlatformLayout {
    fn roots(&self) -> &InstallRoots;

    /// Directory containing the engine executable. May be the engine root
    /// itself.
    fn node_bin_dir(&self) -> PathBuf;

    fn node_executable(&self) -> PathBuf;

    /// `<script_name>-cli.js` inside the npm bundled with the engine.
    fn bundled_cli_script(&self, script_name: &str) -> PathBuf;

    /// The engine's own npm entry point. Only used to bootstrap the managed
    /// package managers.
    fn bundled_npm_script(&self) -> PathBuf;

    fn bundled_npx_script(&self) -> PathBuf;

    /// Entry script of the managed installation of `kind`.
    fn managed_script(&self, kind: PackageManager) -> PathBuf;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Unix(UnixLayout),
    Windows(WindowsLayout),
}

impl Layout {
    /// Picks the layout for a raw OS name (e.g. `"Mac OS X"`, `"Windows 11"`).
    /// Matching is a case-insensitive substring test; unknown systems are an
    /// error, there is no fallback.
    pub fn resolve(base_dir: impl Into<PathBuf>, os_name: &str) -> Result<Self> {
        let lowered = os_name.to_lowercase();
        let roots = InstallRoots::new(base_dir);
        if lowered.contains("mac os") || lowered.contains("linux") {
            Ok(Self::Unix(UnixLayout::new(roots)))
        } else if lowered.contains("windows") {
            Ok(Self::Windows(WindowsLayout::new(roots)))
        } else {
            Err(Error::UnsupportedPlatform {
                os_name: os_name.to_string(),
            })
        }
    }

    /// Resolves the layout for the platform this binary was built for.
    pub fn for_current_os(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::resolve(base_dir, &crate::descriptor::SystemProperties::current().os_name)
    }

    fn platform(&self) -> &dyn PlatformLayout {
        match self {
            Self::Unix(l) => l,
            Self::Windows(l) => l,
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows(_))
    }

    pub fn base_dir(&self) -> &Path {
        self.platform().roots().base_dir()
    }

    pub fn node_install_dir(&self) -> PathBuf {
        self.platform().roots().node_install_dir()
    }

    pub fn manager_install_dir(&self, kind: PackageManager) -> PathBuf {
        self.platform().roots().manager_install_dir(kind)
    }

    pub fn node_bin_dir(&self) -> PathBuf {
        self.platform().node_bin_dir()
    }

    pub fn node_executable(&self) -> PathBuf {
        self.platform().node_executable()
    }

    pub fn bundled_cli_script(&self, script_name: &str) -> PathBuf {
        self.platform().bundled_cli_script(script_name)
    }

    pub fn bundled_npm_script(&self) -> PathBuf {
        self.platform().bundled_npm_script()
    }

    pub fn bundled_npx_script(&self) -> PathBuf {
        self.platform().bundled_npx_script()
    }

    pub fn managed_script(&self, kind: PackageManager) -> PathBuf {
        self.platform().managed_script(kind)
    }
}

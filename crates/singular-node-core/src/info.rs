//! Serializable summary of where the managed tooling lives.

use crate::layout::Layout;
use crate::package_manager::PackageManager;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainInfo {
    pub base_dir: PathBuf,
    pub node_executable: PathBuf,
    pub node_bin_dir: PathBuf,
    pub npm_script: PathBuf,
    pub yarn_script: PathBuf,
    pub pnpm_script: PathBuf,
}

impl ToolchainInfo {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            base_dir: layout.base_dir().to_path_buf(),
            node_executable: layout.node_executable(),
            node_bin_dir: layout.node_bin_dir(),
            npm_script: layout.managed_script(PackageManager::Npm),
            yarn_script: layout.managed_script(PackageManager::Yarn),
            pnpm_script: layout.managed_script(PackageManager::Pnpm),
        }
    }
}

//! One module per CLI command. Commands read their defaults from
//! [`ToolchainConfig`]; flags given on the command line win.

pub mod coordinate;
pub mod install;
pub mod layout;
pub mod sync;

use anyhow::{Context, Result};
use singular_node_core::config::ToolchainConfig;
use singular_node_core::Layout;
use std::path::{Path, PathBuf};

/// Layout for the host platform rooted at `install_dir`, or the configured
/// install directory when none was given.
pub fn resolve_layout(install_dir: Option<&Path>, config: &ToolchainConfig) -> Result<Layout> {
    let base = install_dir.unwrap_or(&config.install_dir);
    Layout::for_current_os(base)
        .with_context(|| format!("Cannot lay out a toolchain under {}", base.display()))
}

/// `dir`, or the process working directory.
pub fn working_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

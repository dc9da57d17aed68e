use anyhow::{Context, Result};
use singular_node_core::config::ToolchainConfig;
use singular_node_core::{Layout, PackageManager};
use singular_node_toolchain::{install_engine, install_manager, ManagerInstall, NodeCommand};
use std::path::Path;

pub fn install_node(archive: &Path, layout: &Layout) -> Result<()> {
    install_engine(archive, layout)
        .with_context(|| format!("Node.js installation from {} failed", archive.display()))?;
    println!("Node.js installed in {}", layout.node_install_dir().display());
    Ok(())
}

pub fn install_package_manager(
    kind: PackageManager,
    version: Option<String>,
    layout: &Layout,
    config: &ToolchainConfig,
) -> Result<()> {
    let version = match version {
        Some(v) => v,
        None => config.require_manager_version(kind)?.to_string(),
    };
    let target = ManagerInstall::new(kind, version);
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let runner = NodeCommand::new(layout.clone(), cwd);

    install_manager(&target, &runner)
        .with_context(|| format!("Installing {} failed", target.package_spec()))?;
    println!("{} installed in {}", target.package_spec(), target.install_dir(layout).display());
    Ok(())
}

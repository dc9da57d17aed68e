use anyhow::{Context, Result};
use singular_node_core::config::ToolchainConfig;
use singular_node_core::{Layout, PackageManager};
use singular_node_toolchain::{completion_marker, run_managed, sync_dependencies};
use std::path::Path;

/// `args` replaces the configured install arguments when non-empty.
pub fn sync_project(
    kind: PackageManager,
    working_dir: &Path,
    args: Vec<String>,
    layout: &Layout,
    config: &ToolchainConfig,
) -> Result<()> {
    let args = if args.is_empty() {
        config.install_args(kind).to_vec()
    } else {
        args
    };
    sync_dependencies(working_dir, layout, kind, &args)
        .with_context(|| format!("{} install in {} failed", kind, working_dir.display()))?;
    println!("Synced {}", completion_marker(working_dir).display());
    Ok(())
}

pub fn run_tool(
    kind: PackageManager,
    working_dir: &Path,
    args: Vec<String>,
    env: Vec<(String, String)>,
    layout: &Layout,
) -> Result<()> {
    run_managed(kind, layout, working_dir, &args, env)
        .with_context(|| format!("{} {} failed", kind, args.join(" ")))
}

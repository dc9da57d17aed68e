mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use singular_node_core::config::ToolchainConfig;
use singular_node_core::observability;

fn main() {
    observability::init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ToolchainConfig::from_env();
    let install_dir = cli.install_dir.as_deref();

    match cli.command {
        Commands::Coordinate {
            version,
            os_name,
            os_arch,
            dist_url,
        } => {
            commands::coordinate::print_coordinate(version, os_name, os_arch, dist_url, &config)?;
        }
        Commands::Layout => {
            let layout = commands::resolve_layout(install_dir, &config)?;
            commands::layout::print_layout(&layout)?;
        }
        Commands::InstallNode { archive } => {
            let layout = commands::resolve_layout(install_dir, &config)?;
            commands::install::install_node(&archive, &layout)?;
        }
        Commands::InstallManager { kind, version } => {
            let layout = commands::resolve_layout(install_dir, &config)?;
            commands::install::install_package_manager(kind, version, &layout, &config)?;
        }
        Commands::Sync { kind, dir, args } => {
            let layout = commands::resolve_layout(install_dir, &config)?;
            let working_dir = commands::working_dir(dir)?;
            commands::sync::sync_project(kind, &working_dir, args, &layout, &config)?;
        }
        Commands::Run {
            kind,
            dir,
            env,
            args,
        } => {
            let layout = commands::resolve_layout(install_dir, &config)?;
            let working_dir = commands::working_dir(dir)?;
            commands::sync::run_tool(kind, &working_dir, args, env, &layout)?;
        }
    }
    Ok(())
}

/// A failed toolchain process hands its exit code through; everything else is 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<singular_node_core::Error>()
        .and_then(singular_node_core::Error::exit_code)
        .unwrap_or(1)
}

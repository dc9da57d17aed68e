use clap::{Parser, Subcommand};
use singular_node_core::PackageManager;
use std::path::PathBuf;

/// Singular Node - one pinned Node.js toolchain shared by every project of a build
#[derive(Parser, Debug)]
#[command(name = "singular-node")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Install base directory holding node/, npm/, yarn/ and pnpm/ (default: ./nodejs)
    #[arg(long, global = true, value_name = "DIR", env = "SINGULAR_NODE_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the artifact coordinate and download URL of the Node.js archive for this machine
    Coordinate {
        /// Node.js version (default: SINGULAR_NODE_VERSION / NODE_VERSION)
        #[arg(long)]
        version: Option<String>,

        /// Raw OS name to compute for instead of the host (e.g. "Mac OS X")
        #[arg(long, value_name = "NAME")]
        os_name: Option<String>,

        /// Raw architecture to compute for instead of the host (e.g. "aarch64")
        #[arg(long, value_name = "ARCH")]
        os_arch: Option<String>,

        /// Distribution server base URL
        #[arg(long, value_name = "URL", env = "SINGULAR_NODE_DIST_URL")]
        dist_url: Option<String>,
    },

    /// Print the resolved tooling paths as JSON
    Layout,

    /// Install the Node.js engine from a downloaded distribution archive
    InstallNode {
        /// Path to node-v<version>-<os>-<arch>.tar.gz or .zip
        #[arg(long, value_name = "FILE")]
        archive: PathBuf,
    },

    /// Install npm, yarn or pnpm with the engine's bundled npm
    InstallManager {
        /// Package manager kind: npm, yarn or pnpm
        #[arg(value_name = "KIND")]
        kind: PackageManager,

        /// Version to install (default: SINGULAR_NODE_<KIND>_VERSION)
        #[arg(long)]
        version: Option<String>,
    },

    /// Run `<kind> install` in a project and record completion
    Sync {
        #[arg(value_name = "KIND")]
        kind: PackageManager,

        /// Project directory (default: current directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Extra install arguments (default: SINGULAR_NODE_<KIND>_INSTALL_ARGS)
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Run the managed package manager with arbitrary arguments
    Run {
        #[arg(value_name = "KIND")]
        kind: PackageManager,

        /// Project directory (default: current directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Environment override, repeatable
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        env: Vec<(String, String)>,

        /// Arguments passed to the package manager
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

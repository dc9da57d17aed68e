//! Singular Node core: one version-pinned Node.js toolchain per build.
//!
//! This crate is IO-free apart from configuration: it resolves where the
//! toolchain lives ([`layout`]) and which distribution archive to fetch
//! ([`descriptor`]). Installing and running is done by
//! `singular-node-toolchain`.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod info;
pub mod layout;
pub mod observability;
pub mod package_manager;

pub use descriptor::{ArtifactDescriptor, SystemProperties};
pub use error::{Error, Result};
pub use info::ToolchainInfo;
pub use layout::Layout;
pub use package_manager::PackageManager;

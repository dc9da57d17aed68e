use anyhow::Result;
use singular_node_core::config::ToolchainConfig;
use singular_node_core::{ArtifactDescriptor, SystemProperties};

/// Prints the coordinate of the archive to fetch, then its download URL.
pub fn print_coordinate(
    version: Option<String>,
    os_name: Option<String>,
    os_arch: Option<String>,
    dist_url: Option<String>,
    config: &ToolchainConfig,
) -> Result<()> {
    let version = match version {
        Some(v) => v,
        None => config.require_node_version()?.to_string(),
    };
    let host = SystemProperties::current();
    let props = SystemProperties::new(
        os_name.unwrap_or(host.os_name),
        os_arch.unwrap_or(host.os_arch),
    );
    let dist_url = dist_url.unwrap_or_else(|| config.dist_url.clone());

    let descriptor = ArtifactDescriptor::compute(&version, &props)?;
    tracing::debug!("Descriptor for {:?}: {:?}", props, descriptor);
    println!("{}", descriptor);
    println!("{}", descriptor.download_url(&dist_url));
    Ok(())
}

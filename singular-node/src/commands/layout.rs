use anyhow::{Context, Result};
use singular_node_core::{Layout, ToolchainInfo};

pub fn print_layout(layout: &Layout) -> Result<()> {
    let info = ToolchainInfo::from_layout(layout);
    let json = serde_json::to_string_pretty(&info).context("Failed to serialize layout")?;
    println!("{}", json);
    Ok(())
}

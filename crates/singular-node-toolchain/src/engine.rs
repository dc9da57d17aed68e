//! Engine installation from a downloaded distribution archive.

use crate::archive;
use crate::info_log;
use singular_node_core::{Error, Layout, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Installs the engine from `archive` into the engine root of `layout`.
///
/// The root is wiped first, so a second install never sees leftovers of the
/// first one and an interrupted install is repaired by simply running again.
pub fn install_engine(archive: &Path, layout: &Layout) -> Result<()> {
    let root = layout.node_install_dir();
    info_log!("Installing Node.js from {} into {}", archive.display(), root.display());

    clean_dir(&root)?;
    let format =
        archive::extract_stripped(archive, &root).map_err(|e| Error::extraction(archive, e))?;

    if format.needs_link_repair() {
        repair_bundled_links(archive, layout)?;
    }
    tracing::debug!("Engine extracted ({:?})", format);
    Ok(())
}

/// Removes `dir` recursively. A directory that does not exist is already clean.
pub(crate) fn clean_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!("Removed {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::filesystem("delete", dir, e)),
    }
}

/// Points the bundled `npm` / `npx` entries in the bin directory at their CLI
/// scripts in the engine's library path, replacing whatever the tar left.
fn repair_bundled_links(archive: &Path, layout: &Layout) -> Result<()> {
    let bin_dir = layout.node_bin_dir();
    fs::create_dir_all(&bin_dir).map_err(|e| Error::filesystem("create", &bin_dir, e))?;

    let bundled = [
        ("npm", layout.bundled_npm_script()),
        ("npx", layout.bundled_npx_script()),
    ];
    for (name, link) in bundled {
        let target = crate::command::absolute(&layout.bundled_cli_script(name))?;
        // Windows runs the CLI script directly, there is nothing to link.
        if crate::command::absolute(&link)? == target {
            continue;
        }

        if fs::symlink_metadata(&link).is_ok() {
            fs::remove_file(&link).map_err(|e| Error::filesystem("delete", &link, e))?;
        }
        archive::create_symlink(&target, &link).map_err(|e| Error::extraction(archive, e))?;
        tracing::debug!("Linked {} -> {}", link.display(), target.display());
    }
    Ok(())
}

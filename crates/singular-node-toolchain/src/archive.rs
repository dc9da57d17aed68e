//! Distribution archive extraction.
//!
//! Node.js archives wrap everything in one top-level directory
//! (`node-v18.16.0-linux-x64/...`). Extraction drops that first path segment
//! so the content lands directly in the target directory.

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// `.zip` by file name, everything else is treated as gzip-compressed tar.
    pub fn from_path(archive: &Path) -> Self {
        let is_zip = archive
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(".zip"))
            .unwrap_or(false);
        if is_zip {
            Self::Zip
        } else {
            Self::TarGz
        }
    }

    /// Tar extraction cannot be trusted to leave the bundled npm / npx links
    /// intact, zip archives carry plain files.
    pub fn needs_link_repair(self) -> bool {
        matches!(self, Self::TarGz)
    }
}

/// Extracts `archive` into `dest`, stripping the first segment of every entry
/// path. Returns the format that was used.
pub fn extract_stripped(archive: &Path, dest: &Path) -> io::Result<ArchiveFormat> {
    let format = ArchiveFormat::from_path(archive);
    fs::create_dir_all(dest)?;
    match format {
        ArchiveFormat::Zip => extract_zip(archive, dest)?,
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest)?,
    }
    Ok(format)
}

/// Drops the first segment of an archive entry path. `None` when nothing is
/// left (the wrapping directory itself). Absolute paths and `..` segments are
/// rejected.
pub fn strip_first_component(entry: &Path) -> io::Result<Option<PathBuf>> {
    let mut rest = PathBuf::new();
    let mut seen_first = false;
    for component in entry.components() {
        match component {
            Component::Normal(part) => {
                if seen_first {
                    rest.push(part);
                } else {
                    seen_first = true;
                }
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid_data(format!(
                    "refusing archive entry outside the target: {}",
                    entry.display()
                )));
            }
        }
    }
    Ok(if rest.as_os_str().is_empty() {
        None
    } else {
        Some(rest)
    })
}

fn extract_tar_gz(archive: &Path, dest: &Path) -> io::Result<()> {
    let file = File::open(archive)?;
    let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));

    for entry in tar.entries()? {
        let mut entry = entry?;
        let raw = entry.path()?.into_owned();
        let Some(relative) = strip_first_component(&raw)? else {
            continue;
        };
        let target = dest.join(&relative);
        let kind = entry.header().entry_type();
        reject_symlinked_parents(dest, &relative)?;

        if kind.is_dir() {
            if is_symlink(&target) {
                return Err(invalid_data(format!(
                    "directory entry replaces a symlink: {}",
                    raw.display()
                )));
            }
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        if is_symlink(&target) {
            fs::remove_file(&target)?;
        }

        if kind.is_file() || kind.is_contiguous() {
            entry.unpack(&target)?;
        } else if kind.is_symlink() {
            let link = entry
                .link_name()?
                .ok_or_else(|| invalid_data(format!("symlink without target: {}", raw.display())))?
                .into_owned();
            if link_stays_inside(&relative, &link) {
                create_symlink(&link, &target)?;
            } else {
                tracing::warn!(
                    "Skipping symlink {} -> {} (points outside the install root)",
                    raw.display(),
                    link.display()
                );
            }
        } else if kind.is_hard_link() {
            let link = entry
                .link_name()?
                .ok_or_else(|| invalid_data(format!("hard link without target: {}", raw.display())))?;
            let source = strip_first_component(&link)?
                .ok_or_else(|| invalid_data(format!("hard link to archive root: {}", raw.display())))?;
            reject_symlinked_parents(dest, &source)?;
            fs::hard_link(dest.join(source), &target)?;
        } else {
            tracing::debug!("Skipping tar entry {} ({:?})", raw.display(), kind);
        }
    }
    Ok(())
}

fn extract_zip(archive: &Path, dest: &Path) -> io::Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file)).map_err(zip_error)?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(zip_error)?;
        let raw = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| invalid_data(format!("unsafe zip entry path: {}", entry.name())))?;
        let Some(relative) = strip_first_component(&raw)? else {
            continue;
        };
        let target = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        apply_unix_mode(&target, entry.unix_mode())?;
    }
    Ok(())
}

#[cfg(unix)]
fn apply_unix_mode(target: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    match mode {
        Some(mode) => fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o777)),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn apply_unix_mode(_target: &Path, _mode: Option<u32>) -> io::Result<()> {
    Ok(())
}

/// Fails when a directory between `dest` and the entry at `relative` is a
/// symlink. Only earlier entries of the same archive can have put one there,
/// and writing through it may land outside `dest`.
fn reject_symlinked_parents(dest: &Path, relative: &Path) -> io::Result<()> {
    let mut current = dest.to_path_buf();
    let mut components = relative.components().peekable();
    while let Some(component) = components.next() {
        if components.peek().is_none() {
            break;
        }
        current.push(component);
        if is_symlink(&current) {
            return Err(invalid_data(format!(
                "archive entry {} goes through symlink {}",
                relative.display(),
                current.display()
            )));
        }
    }
    Ok(())
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Lexically resolves `link` relative to the directory of `relative` (an
/// entry path below the install root) and checks that it does not climb
/// above that root.
fn link_stays_inside(relative: &Path, link: &Path) -> bool {
    if link.is_absolute() {
        return false;
    }
    let mut depth: usize = relative.components().count().saturating_sub(1);
    for component in link.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

pub(crate) fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    return std::os::unix::fs::symlink(target, link);
    #[cfg(windows)]
    return std::os::windows::fs::symlink_file(target, link);
    #[cfg(not(any(unix, windows)))]
    return Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot link {} -> {}", link.display(), target.display()),
    ));
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn zip_error(e: zip::result::ZipError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders for small synthetic archives.

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::path::Path;

    pub(crate) enum TarEntry<'a> {
        Dir(&'a str),
        File(&'a str, &'a str),
        Symlink(&'a str, &'a str),
    }

    pub(crate) fn write_tar_gz(path: &Path, entries: &[TarEntry<'_>]) {
        let file = std::fs::File::create(path).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        for entry in entries {
            let mut header = tar::Header::new_gnu();
            match entry {
                TarEntry::Dir(name) => {
                    header.set_entry_type(tar::EntryType::Directory);
                    header.set_mode(0o755);
                    header.set_size(0);
                    builder.append_data(&mut header, name, std::io::empty()).unwrap();
                }
                TarEntry::File(name, content) => {
                    header.set_entry_type(tar::EntryType::Regular);
                    header.set_mode(0o755);
                    header.set_size(content.len() as u64);
                    builder
                        .append_data(&mut header, name, content.as_bytes())
                        .unwrap();
                }
                TarEntry::Symlink(name, target) => {
                    header.set_entry_type(tar::EntryType::Symlink);
                    header.set_mode(0o777);
                    header.set_size(0);
                    builder.append_link(&mut header, name, target).unwrap();
                }
            }
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    pub(crate) fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default().unix_permissions(0o755);
        for (name, content) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
}

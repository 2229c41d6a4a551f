//! Primitive single-path file operations
//!
//! OS failures are returned as they come, without translation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Rename a file (or directory) in place
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)?;
    log::debug!("Renamed {:?} -> {:?}", from, to);
    Ok(())
}

/// Move a file, copying and removing the source when it crosses filesystems
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::CrossesDevices => copy_then_remove(from, to)?,
        Err(e) => return Err(e.into()),
    }
    log::debug!("Moved {:?} -> {:?}", from, to);
    Ok(())
}

/// Cross-device move: copy the contents, then delete the source
fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)?;
    fs::remove_file(from)?;
    Ok(())
}

/// Delete a single file
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)?;
    log::debug!("Removed {:?}", path);
    Ok(())
}

/// Delete a directory and everything under it
pub fn remove_path_with_files(path: &Path) -> Result<()> {
    fs::remove_dir_all(path)?;
    log::debug!("Removed directory tree {:?}", path);
    Ok(())
}

/// Replace `target` with `replacement` using a single rename
///
/// On one filesystem `target` always holds either the old or the new content.
/// Across filesystems the replacement is first copied to a hidden sibling of
/// `target`, which is then renamed over it, so the swap itself stays a rename.
pub fn replace_file(replacement: &Path, target: &Path) -> Result<()> {
    match fs::rename(replacement, target) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {}
        Err(e) => return Err(e.into()),
    }
    replace_via_sibling(replacement, target)
}

/// Cross-device replace: copy next to `target`, then rename over it
fn replace_via_sibling(replacement: &Path, target: &Path) -> Result<()> {
    let sibling = sibling_temp_path(target);
    fs::copy(replacement, &sibling)?;
    if let Err(e) = fs::rename(&sibling, target) {
        let _ = fs::remove_file(&sibling);
        return Err(e.into());
    }
    fs::remove_file(replacement)?;
    Ok(())
}

fn sibling_temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.partial", name))
}

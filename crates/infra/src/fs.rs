//! Filesystem helpers for atomic table writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `bytes` to `destination` through a sibling temp file and a rename,
/// so readers see either the old content or the new content, never a prefix.
pub fn write_atomic(destination: &Path, bytes: &[u8]) -> io::Result<()> {
    let temp = temp_path(destination);
    fs::write(&temp, bytes)?;
    rename_with_fallback(&temp, destination)
}

fn temp_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{name}.tmp"))
}

/// Rename, removing the destination first where the platform refuses to
/// replace an existing file. The temp file is removed if the rename fails.
pub fn rename_with_fallback(temp: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial) = fs::rename(temp, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp, destination).map_err(|retry| {
            let _ = fs::remove_file(temp);
            io::Error::new(
                retry.kind(),
                format!("atomic rename failed (initial: {initial}, retry: {retry})"),
            )
        })?;
    }
    Ok(())
}

/// Remove a file; a file that is already gone is not an error.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

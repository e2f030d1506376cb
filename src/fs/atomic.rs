//! Replace-by-rename file writes.
//!
//! The minion config is written to a temporary file next to the target,
//! synced, given its final permissions, and then renamed over the target.
//! A crash mid-write therefore leaves either the old file or the new one,
//! never a truncated mix.
//!
//! Source and destination share a directory so the rename stays on one
//! filesystem. On crash a `.{filename}.tmp` file may remain.

use crate::error::{OrcaError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Permission bits for config files: rw for owner, r for group and others.
pub const CONFIG_FILE_MODE: u32 = 0o644;

/// Overwrite `path` with `content`, ending with mode `0644` on unix.
///
/// A symlinked `path` is resolved first so the file it points to is
/// replaced and the link itself stays in place.
///
/// # Returns
///
/// * `Ok(())` - The target now holds exactly `content`
/// * `Err(OrcaError::Write)` - Temp file creation, write, sync or rename failed
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = resolve_target(path.as_ref());

    let temp_path = generate_temp_path(&path)?;

    write_and_sync(&temp_path, content)?;

    replace(&temp_path, &path)
}

/// Follow symlinks to the real file; a path that does not exist yet is used as is.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            OrcaError::Write(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn open_temp(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CONFIG_FILE_MODE);
    }

    options.open(path)
}

/// Write content to a file, fix its permissions and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = open_temp(path).map_err(|e| {
        OrcaError::Write(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let cleanup = |msg: String| {
        let _ = fs::remove_file(path);
        OrcaError::Write(msg)
    };

    file.write_all(content)
        .map_err(|e| cleanup(format!("failed to write to temporary file: {}", e)))?;

    // The open() mode is filtered through the umask; set it explicitly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(CONFIG_FILE_MODE))
            .map_err(|e| cleanup(format!("failed to set permissions: {}", e)))?;
    }

    file.sync_all()
        .map_err(|e| cleanup(format!("failed to sync temporary file to disk: {}", e)))?;

    Ok(())
}

/// Rename `source` over `target`.
fn replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        OrcaError::Write(format!("failed to replace '{}': {}", target.display(), e))
    })?;

    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

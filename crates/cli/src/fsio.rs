// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem helpers shared by settings, key, config and transcript writes.
//!
//! Every write goes through a temporary file in the target directory that is
//! renamed over the destination, so readers never observe a partial file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Parse content as JSON5, falling back to strict JSON on parse failure.
///
/// JSON5 supports comments and trailing commas, which users occasionally put
/// in hand-edited settings files.
pub fn parse_json5_or_json<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<T, serde_json::Error> {
    json5::from_str(content).or_else(|_| serde_json::from_str(content))
}

/// Ensure a file's parent directory exists, creating it and ancestors if needed.
pub fn ensure_parent_exists(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Replace `path` with `contents` via write-then-rename.
///
/// An existing file keeps its permissions. New files are created owner-only.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());
    persist(path, contents, existing)
}

/// Like [`write_atomic`], but the result is always owner read/write only.
pub fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    persist(path, contents, private_permissions())
}

fn persist(
    path: &Path,
    contents: &[u8],
    permissions: Option<std::fs::Permissions>,
) -> std::io::Result<()> {
    ensure_parent_exists(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        std::fs::set_permissions(temp.path(), permissions)?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn private_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o600))
}

// No mode bits on Windows; the file inherits the directory ACL.
#[cfg(not(unix))]
fn private_permissions() -> Option<std::fs::Permissions> {
    None
}

#[cfg(test)]
#[path = "fsio_tests.rs"]
mod tests;

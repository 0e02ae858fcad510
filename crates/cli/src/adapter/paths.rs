// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Path conventions dictated by the tools themselves.
//!
//! These must match what each tool computes byte for byte, otherwise a
//! restored transcript lands where the tool never looks.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::AdapterError;
use crate::env;

/// Claude Code's project directory name: every character that is not an
/// ASCII letter or digit becomes `-`.
///
/// `/Users/user/Developer/myproject` → `-Users-user-Developer-myproject`,
/// `D:\sources\foo` → `D--sources-foo`.
pub fn sanitize_project_path(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Gemini CLI's project directory name: hex SHA-256 of the project path.
pub fn project_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hex::encode(hasher.finalize())
}

/// Last component of a path, used to compare project directories.
pub fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn home() -> Result<PathBuf, AdapterError> {
    env::home().ok_or(AdapterError::HomeNotFound)
}

/// `CLAUDE_CONFIG_DIR`, else `~/.claude`.
pub fn claude_root() -> Result<PathBuf, AdapterError> {
    match env::claude_config_dir() {
        Some(dir) => Ok(dir),
        None => Ok(home()?.join(".claude")),
    }
}

/// `$GEMINI_CLI_HOME/.gemini`, else `~/.gemini`.
pub fn gemini_root() -> Result<PathBuf, AdapterError> {
    match env::gemini_cli_home() {
        Some(dir) => Ok(dir.join(".gemini")),
        None => Ok(home()?.join(".gemini")),
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

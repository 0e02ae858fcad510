// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by sessync are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `SESSYNC_CONFIG_DIR` — overrides `~/.sessync`.
pub fn config_dir() -> Option<PathBuf> {
    var_path(names::SESSYNC_CONFIG_DIR)
}

/// `SESSYNC_API_URL` — overrides the API URL from `config.toml`.
pub fn api_url() -> Option<String> {
    var_non_empty(names::SESSYNC_API_URL)
}

/// `SESSYNC_HOOK_TIMEOUT_MS` — hard timeout for network work inside a hook.
pub fn hook_timeout_ms() -> Option<u64> {
    var_non_empty(names::SESSYNC_HOOK_TIMEOUT_MS).and_then(|v| v.parse().ok())
}

/// `SESSYNC_LOG` — tracing filter directive (e.g. `sessync=debug`).
pub fn log_filter() -> Option<String> {
    var_non_empty(names::SESSYNC_LOG)
}

/// `CLAUDE_CONFIG_DIR` — Claude Code config directory.
pub fn claude_config_dir() -> Option<PathBuf> {
    var_path(names::CLAUDE_CONFIG_DIR)
}

/// `GEMINI_CLI_HOME` — directory that holds Gemini CLI's `.gemini` folder.
pub fn gemini_cli_home() -> Option<PathBuf> {
    var_path(names::GEMINI_CLI_HOME)
}

/// `HOME` (or `USERPROFILE` on Windows) — user's home directory.
pub fn home() -> Option<PathBuf> {
    var_path(names::HOME).or_else(|| var_path(names::USERPROFILE))
}

fn var_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_path(name: &str) -> Option<PathBuf> {
    var_non_empty(name).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

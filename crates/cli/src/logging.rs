// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! Commands log to stderr. Hook invocations append to `hooks.log` because the
//! host CLI owns the hook's stdout and may surface stderr to the user.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// `-v` count wins, then `SESSYNC_LOG`, then `default`.
pub fn filter(verbose: u8, default: &str) -> EnvFilter {
    match verbose {
        0 => env::log_filter()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(default)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: u8, target: &LogTarget) {
    match target {
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(filter(verbose, "warn"))
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => match open_log(path) {
            Ok(file) => {
                let _ = fmt()
                    .with_env_filter(filter(verbose, "info"))
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(_) => {
                // The hook must still run when its log is not writable.
                let _ = fmt()
                    .with_env_filter(filter(verbose, "info"))
                    .with_writer(std::io::sink)
                    .try_init();
            }
        },
    }
}

fn open_log(path: &Path) -> std::io::Result<std::fs::File> {
    crate::fsio::ensure_parent_exists(path)?;
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

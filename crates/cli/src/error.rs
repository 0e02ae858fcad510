// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level error type for the sync pipelines.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::adapter::AdapterError;
use crate::api::ApiError;
use crate::config::ConfigError;
use crate::installer::InstallError;
use sessync_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("transfer corrupted: checksum mismatch (expected {expected}, got {actual})")]
    CorruptTransfer { expected: String, actual: String },

    #[error("decryption failed: wrong key or corrupted ciphertext (local key {fingerprint})")]
    WrongKeyOrCorrupt { fingerprint: String },

    #[error("encryption key missing: no key at {}", path.display())]
    KeyMissing { path: PathBuf },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("encryption is not enabled; run `sessync encryption enable`")]
    EncryptionDisabled,

    #[error("not logged in; run `sessync login`")]
    NotLoggedIn,

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    ///
    /// 1 is generic failure, 3 a missing precondition the user can fix,
    /// 4 an integrity failure, 5 a missing remote object. Code 2 is never
    /// used because hook hosts treat it as "block the action".
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::NotLoggedIn
            | SyncError::EncryptionDisabled
            | SyncError::KeyMissing { .. }
            | SyncError::Api(ApiError::Unauthorized) => 3,
            SyncError::CorruptTransfer { .. } | SyncError::WrongKeyOrCorrupt { .. } => 4,
            SyncError::NotFound(_) | SyncError::Api(ApiError::NotFound(_)) => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

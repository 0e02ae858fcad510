// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk storage of the local encryption key.
//!
//! The key file holds the 32 raw key bytes with owner-only permissions.
//! Keys retired by a rotation or an import are kept next to it with a
//! `.previous` suffix, oldest first, until every remote transcript has been
//! re-encrypted under the current key.

use sessync_crypto::{CryptoError, EncryptionKey, KEY_LEN};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use crate::error::SyncError;
use crate::fsio;

#[derive(Clone, Debug)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<key>.previous`
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("encryption.key"));
        name.push(".previous");
        self.path.with_file_name(name)
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// The current key, if one has been created.
    pub fn load(&self) -> Result<Option<EncryptionKey>, SyncError> {
        read_key(&self.path)
    }

    /// The current key, or `KeyMissing`.
    pub fn require(&self) -> Result<EncryptionKey, SyncError> {
        self.load()?.ok_or_else(|| SyncError::KeyMissing {
            path: self.path.clone(),
        })
    }

    pub fn save(&self, key: &EncryptionKey) -> Result<(), SyncError> {
        fsio::write_private(&self.path, key.as_bytes())
            .map_err(|e| SyncError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), fingerprint = %key.fingerprint(), "saved key");
        Ok(())
    }

    /// Create and persist a fresh key.
    pub fn generate(&self) -> Result<EncryptionKey, SyncError> {
        let key = EncryptionKey::generate();
        self.save(&key)?;
        Ok(key)
    }

    /// Keys saved by [`KeyStore::backup`], oldest first. Empty when no
    /// rotation is pending.
    pub fn load_previous(&self) -> Result<Vec<EncryptionKey>, SyncError> {
        let backup = self.backup_path();
        let bytes = match std::fs::read(&backup) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SyncError::io(backup, e)),
        };
        if bytes.is_empty() || bytes.len() % KEY_LEN != 0 {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            }
            .into());
        }
        bytes
            .chunks_exact(KEY_LEN)
            .map(|chunk| EncryptionKey::from_bytes(chunk).map_err(SyncError::from))
            .collect()
    }

    /// Replace the backup with `retired`, oldest first.
    pub fn backup(&self, retired: &[EncryptionKey]) -> Result<(), SyncError> {
        let backup = self.backup_path();
        let mut bytes = Zeroizing::new(Vec::with_capacity(retired.len() * KEY_LEN));
        for key in retired {
            bytes.extend_from_slice(key.as_bytes());
        }
        fsio::write_private(&backup, &bytes).map_err(|e| SyncError::io(&backup, e))
    }

    /// Add `key` to the backup unless it is already there.
    pub fn retire(&self, key: &EncryptionKey) -> Result<Vec<EncryptionKey>, SyncError> {
        let mut retired = self.load_previous()?;
        if !retired.contains(key) {
            retired.push(key.clone());
            self.backup(&retired)?;
        }
        Ok(retired)
    }

    pub fn clear_backup(&self) -> Result<(), SyncError> {
        let backup = self.backup_path();
        match std::fs::remove_file(&backup) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::io(backup, e)),
        }
    }
}

fn read_key(path: &Path) -> Result<Option<EncryptionKey>, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            Ok(Some(EncryptionKey::from_bytes(&bytes)?))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::io(path, e)),
    }
}

#[cfg(test)]
#[path = "keystore_tests.rs"]
mod tests;

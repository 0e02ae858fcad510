// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Symmetric key material.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Length of a key fingerprint in hex characters.
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// A 256-bit encryption key. The bytes are wiped when the key is dropped.
#[derive(Clone)]
pub struct EncryptionKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl EncryptionKey {
    /// Generate a fresh key from the OS random source.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(bytes.as_mut());
        Self { bytes }
    }

    /// Build a key from raw bytes, rejecting anything that is not exactly
    /// [`KEY_LEN`] long.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: raw.len(),
            });
        }
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        bytes.copy_from_slice(raw);
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Non-secret identifier for display and logs: the first 8 bytes of the
    /// SHA-256 of the key, hex encoded.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes.as_ref());
        hex::encode(&digest[..FINGERPRINT_HEX_LEN / 2])
    }
}

impl PartialEq for EncryptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_ref() == other.bytes.as_ref()
    }
}

impl Eq for EncryptionKey {}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;

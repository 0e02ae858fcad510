// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript transfer encoding.
//!
//! Upload: plaintext → (encrypt) → checksum → base64.
//! Download: base64 → checksum → (load key, decrypt) → plaintext.
//!
//! The checksum always covers the transmitted bytes, so a corrupted transfer
//! is detected before a key is even loaded.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sessync_crypto::{CryptoError, EncryptionKey};

use crate::error::SyncError;

/// Something that can seal and open transcript bytes.
pub trait TranscriptCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CryptoError>;
    /// Short identifier shown in errors; never the key material.
    fn fingerprint(&self) -> String;
}

impl TranscriptCipher for EncryptionKey {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        sessync_crypto::encrypt(plaintext, self)
    }

    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
        sessync_crypto::decrypt(blob, self)
    }

    fn fingerprint(&self) -> String {
        EncryptionKey::fingerprint(self)
    }
}

/// A transcript ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedPayload {
    /// Base64 of the transmitted bytes
    pub content: String,
    /// Hex SHA-256 of the transmitted bytes
    pub checksum: String,
    pub encrypted: bool,
    /// Plaintext length in bytes
    pub size: usize,
}

pub fn prepare_upload(
    plaintext: &[u8],
    cipher: Option<&dyn TranscriptCipher>,
) -> Result<PreparedPayload, SyncError> {
    let transmitted = match cipher {
        Some(cipher) => cipher.encrypt(plaintext)?,
        None => plaintext.to_vec(),
    };
    Ok(PreparedPayload {
        checksum: sessync_crypto::checksum(&transmitted),
        content: BASE64.encode(&transmitted),
        encrypted: cipher.is_some(),
        size: plaintext.len(),
    })
}

/// Decode and verify a received transcript.
///
/// `load_cipher` runs only for encrypted payloads whose checksum matched.
pub fn open_payload<C, F>(
    content: &str,
    expected_checksum: &str,
    encrypted: bool,
    load_cipher: F,
) -> Result<Vec<u8>, SyncError>
where
    C: TranscriptCipher,
    F: FnOnce() -> Result<C, SyncError>,
{
    let transmitted = decode_content(content)?;
    verify(&transmitted, expected_checksum)?;

    if !encrypted {
        return Ok(transmitted);
    }
    let cipher = load_cipher()?;
    cipher
        .decrypt(&transmitted)
        .map_err(|_| SyncError::WrongKeyOrCorrupt {
            fingerprint: cipher.fingerprint(),
        })
}

pub fn decode_content(content: &str) -> Result<Vec<u8>, SyncError> {
    BASE64
        .decode(content.trim())
        .map_err(|e| SyncError::InvalidPayload(format!("transcript is not valid base64: {e}")))
}

pub fn verify(transmitted: &[u8], expected_checksum: &str) -> Result<(), SyncError> {
    if sessync_crypto::verify_checksum(transmitted, expected_checksum) {
        Ok(())
    } else {
        Err(SyncError::CorruptTransfer {
            expected: expected_checksum.to_string(),
            actual: sessync_crypto::checksum(transmitted),
        })
    }
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;

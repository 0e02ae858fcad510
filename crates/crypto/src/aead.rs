// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! AES-256-GCM with a 16-byte nonce.
//!
//! Blob layout: `nonce (16) || tag (16) || ciphertext`. The layout is fixed;
//! there is no version byte and no algorithm negotiation.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::key::EncryptionKey;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 16;
/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Length of the fixed header preceding the ciphertext.
pub const HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

type Aes256Gcm16 = AesGcm<Aes256, U16>;

fn cipher(key: &EncryptionKey) -> Aes256Gcm16 {
    Aes256Gcm16::new(GenericArray::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
pub fn encrypt(plaintext: &[u8], key: &EncryptionKey) -> Result<Vec<u8>, CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let mut buffer = plaintext.to_vec();
    let tag = cipher(key)
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut blob = Vec::with_capacity(HEADER_LEN + buffer.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(tag.as_slice());
    blob.extend_from_slice(&buffer);
    Ok(blob)
}

/// Decrypt a blob produced by [`encrypt`].
///
/// Fails with [`CryptoError::DecryptionFailed`] when the blob is shorter than
/// [`HEADER_LEN`] or the tag does not verify. No plaintext is returned on
/// failure.
pub fn decrypt(blob: &[u8], key: &EncryptionKey) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < HEADER_LEN {
        return Err(CryptoError::DecryptionFailed);
    }
    let (nonce, rest) = blob.split_at(NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let mut buffer = ciphertext.to_vec();
    match cipher(key).decrypt_in_place_detached(
        GenericArray::from_slice(nonce),
        b"",
        &mut buffer,
        GenericArray::from_slice(tag),
    ) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            buffer.zeroize();
            Err(CryptoError::DecryptionFailed)
        }
    }
}

#[cfg(test)]
#[path = "aead_tests.rs"]
mod tests;

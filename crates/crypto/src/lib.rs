// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Integrity and encryption codec for transcript transfer.
//!
//! Two independent layers are applied to every transcript that leaves the
//! machine:
//!
//! - a SHA-256 [`checksum`] over the transmitted bytes, so transport corruption
//!   is detected before any decryption is attempted;
//! - AES-256-GCM with a 16-byte nonce ([`encrypt`]/[`decrypt`]), producing the
//!   fixed blob layout `nonce (16) || tag (16) || ciphertext`.

mod aead;
mod checksum;
mod error;
mod key;

pub use aead::{decrypt, encrypt, HEADER_LEN, NONCE_LEN, TAG_LEN};
pub use checksum::{checksum, verify_checksum, CHECKSUM_HEX_LEN};
pub use error::CryptoError;
pub use key::{EncryptionKey, FINGERPRINT_HEX_LEN, KEY_LEN};

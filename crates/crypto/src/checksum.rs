// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content checksums, computed identically on upload and download.

use sha2::{Digest, Sha256};

/// Length of a checksum in hex characters.
pub const CHECKSUM_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Check `bytes` against a declared checksum. Hex case is ignored.
pub fn verify_checksum(bytes: &[u8], expected: &str) -> bool {
    checksum(bytes).eq_ignore_ascii_case(expected.trim())
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;

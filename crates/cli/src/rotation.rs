// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Re-encrypts every remote transcript under a fresh key.
//!
//! The outgoing key joins the retired keys in `encryption.key.previous` and the
//! new key is written to disk before any transcript is touched. A failure on
//! one session is recorded and the loop moves on. While retired keys exist a
//! rotation is considered unfinished: running `rotate_key` again resumes it
//! with the same current key, unless a new key is forced, in which case the
//! current key is retired too. Every retired key is tried when decrypting, and
//! the backup is removed once every session has been rotated.

use serde::Serialize;
use sessync_crypto::EncryptionKey;

use crate::api::{list_all_sessions, RemoteSession, RemoteStore, TranscriptUpload};
use crate::config::Config;
use crate::error::SyncError;
use crate::keystore::KeyStore;
use crate::transfer::{self, TranscriptCipher};

/// Outcome for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RotationResult {
    pub session_id: String,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RotationReport {
    pub results: Vec<RotationResult>,
    /// Fingerprint of the key now on disk
    pub new_fingerprint: String,
    /// An interrupted rotation was continued
    pub resumed: bool,
    /// Old keys still kept because some sessions were not rotated
    pub retired_keys: usize,
}

impl RotationReport {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    pub fn is_complete(&self) -> bool {
        self.error_count() == 0
    }
}

enum Rotated {
    Reencrypted,
    AlreadyCurrent,
}

/// Rotate to a fresh key, or finish a pending rotation. `force_new` generates
/// a fresh key even when a pending rotation exists.
pub async fn rotate_key(
    store: &dyn RemoteStore,
    keys: &KeyStore,
    config: &Config,
    force_new: bool,
) -> Result<RotationReport, SyncError> {
    if !config.encryption_enabled {
        return Err(SyncError::EncryptionDisabled);
    }

    let retired = keys.load_previous()?;
    let current = keys.require()?;

    let targets: Vec<RemoteSession> = list_all_sessions(store)
        .await?
        .into_iter()
        .filter(|s| s.is_encrypted && s.has_transcript)
        .collect();

    let resumed = !retired.is_empty() && !force_new;
    let (old, new) = if resumed {
        tracing::info!(
            retired = retired.len(),
            new = %current.fingerprint(),
            "resuming interrupted key rotation"
        );
        (retired, current)
    } else {
        let old = keys.retire(&current)?;
        let new = EncryptionKey::generate();
        keys.save(&new)?;
        tracing::info!(
            old = %current.fingerprint(),
            new = %new.fingerprint(),
            retired = old.len(),
            sessions = targets.len(),
            "rotating key"
        );
        (old, new)
    };

    let mut results = Vec::with_capacity(targets.len());
    for session in &targets {
        let result = match rotate_one(store, &session.id, &old, &new).await {
            Ok(Rotated::Reencrypted) => success(&session.id),
            Ok(Rotated::AlreadyCurrent) => {
                tracing::debug!(session = %session.id, "already encrypted with new key");
                success(&session.id)
            }
            Err(e) => {
                tracing::warn!(session = %session.id, error = %e, "failed to rotate session");
                RotationResult {
                    session_id: session.id.clone(),
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(result);
    }

    let mut report = RotationReport {
        results,
        new_fingerprint: new.fingerprint(),
        resumed,
        retired_keys: 0,
    };
    if report.is_complete() {
        keys.clear_backup()?;
    } else {
        report.retired_keys = old.len();
        tracing::warn!(
            failed = report.error_count(),
            backup = %keys.backup_path().display(),
            "rotation incomplete; retired keys kept"
        );
    }
    Ok(report)
}

async fn rotate_one(
    store: &dyn RemoteStore,
    session_id: &str,
    old: &[EncryptionKey],
    new: &EncryptionKey,
) -> Result<Rotated, SyncError> {
    let record = store.download_transcript(session_id).await?;
    if !record.encrypted {
        return Err(SyncError::InvalidPayload(
            "remote transcript is not encrypted".to_string(),
        ));
    }

    let blob = transfer::decode_content(&record.content)?;
    transfer::verify(&blob, &record.checksum)?;

    if TranscriptCipher::decrypt(new, &blob).is_ok() {
        return Ok(Rotated::AlreadyCurrent);
    }
    let plaintext = old
        .iter()
        .rev()
        .find_map(|key| TranscriptCipher::decrypt(key, &blob).ok())
        .ok_or_else(|| SyncError::WrongKeyOrCorrupt {
            fingerprint: old.last().unwrap_or(new).fingerprint(),
        })?;

    let prepared = transfer::prepare_upload(&plaintext, Some(new))?;
    let upload = TranscriptUpload {
        content: prepared.content,
        encrypted: prepared.encrypted,
        checksum: prepared.checksum,
    };
    store.replace_transcript(session_id, &upload).await?;
    Ok(Rotated::Reencrypted)
}

fn success(session_id: &str) -> RotationResult {
    RotationResult {
        session_id: session_id.to_string(),
        success: true,
        error: None,
    }
}

#[cfg(test)]
#[path = "rotation_tests.rs"]
mod tests;

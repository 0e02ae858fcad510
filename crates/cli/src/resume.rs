// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Restores a downloaded transcript where the target CLI will find it.
//!
//! Order is fixed: decode, verify checksum, load key, decrypt, then write.
//! Nothing touches the filesystem until the plaintext is known good.

use std::path::{Path, PathBuf};

use crate::adapter::paths::basename;
use crate::adapter::CliAdapter;
use crate::api::{ApiError, RemoteStore, TranscriptRecord};
use crate::error::SyncError;
use crate::fsio;
use crate::keystore::KeyStore;
use crate::transfer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Where the transcript was written
    pub path: PathBuf,
    /// Set when the current directory does not look like the original project
    pub warning: Option<String>,
    /// Plaintext bytes written
    pub bytes: usize,
}

/// Verify, decrypt and write `record` as session `record.local_session_id` of
/// the project at `cwd`.
pub fn restore_transcript(
    record: &TranscriptRecord,
    adapter: &dyn CliAdapter,
    cwd: &Path,
    keys: &KeyStore,
) -> Result<RestoreOutcome, SyncError> {
    let plaintext = transfer::open_payload(
        &record.content,
        &record.checksum,
        record.encrypted,
        || keys.require(),
    )?;

    let path = adapter.transcript_path(cwd, &record.local_session_id);
    let warning = record
        .project_path
        .as_deref()
        .and_then(|origin| project_mismatch(cwd, origin));
    if let Some(warning) = &warning {
        tracing::warn!("{warning}");
    }

    fsio::write_atomic(&path, &plaintext).map_err(|e| SyncError::io(&path, e))?;
    tracing::info!(
        session = %record.local_session_id,
        path = %path.display(),
        bytes = plaintext.len(),
        "restored transcript"
    );
    Ok(RestoreOutcome {
        path,
        warning,
        bytes: plaintext.len(),
    })
}

/// Download session `session_id` and restore it into `cwd`.
pub async fn resume_session(
    store: &dyn RemoteStore,
    session_id: &str,
    adapter: &dyn CliAdapter,
    cwd: &Path,
    keys: &KeyStore,
) -> Result<RestoreOutcome, SyncError> {
    let record = fetch_record(store, session_id).await?;
    restore_transcript(&record, adapter, cwd, keys)
}

/// Download the transcript of `session_id`, mapping a 404 to [`SyncError::NotFound`].
pub async fn fetch_record(
    store: &dyn RemoteStore,
    session_id: &str,
) -> Result<TranscriptRecord, SyncError> {
    store
        .download_transcript(session_id)
        .await
        .map_err(|e| match e {
            ApiError::NotFound(_) => SyncError::NotFound(format!("session {session_id}")),
            other => SyncError::Api(other),
        })
}

/// The origin may come from another OS, so both separators split it.
fn project_mismatch(cwd: &Path, origin: &str) -> Option<String> {
    let here = basename(cwd)?;
    let there = origin.rsplit(['/', '\\']).find(|part| !part.is_empty())?;
    (here != there).then(|| {
        format!(
            "session was recorded in `{origin}` but is being restored into `{}`",
            cwd.display()
        )
    })
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;

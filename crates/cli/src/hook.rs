// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Handling of a single hook invocation.
//!
//! The host CLI waits for the hook to exit, so every network call runs under
//! one hard timeout and network trouble is logged, never returned. Only a
//! payload that cannot be parsed fails the invocation.

use std::time::Duration;

use crate::adapter::CliAdapter;
use crate::api::{RemoteStore, UploadRequest};
use crate::error::SyncError;
use crate::event::NormalizedHookContext;
use crate::keystore::KeyStore;
use crate::transfer::{self, TranscriptCipher};

/// Default budget for network work in one hook invocation.
pub const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_millis(10_000);

/// What a hook invocation needs besides its stdin.
pub struct HookRuntime<'a> {
    /// `None` when not logged in
    pub store: Option<&'a dyn RemoteStore>,
    pub machine_id: String,
    pub encryption_enabled: bool,
    pub keys: &'a KeyStore,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HookOutcome {
    pub context: NormalizedHookContext,
    pub event_sent: bool,
    pub transcript_uploaded: bool,
    /// Non-fatal problems, already logged
    pub warnings: Vec<String>,
}

pub async fn run_hook(
    adapter: &dyn CliAdapter,
    input: &str,
    runtime: &HookRuntime<'_>,
) -> Result<HookOutcome, SyncError> {
    let context = adapter.parse_hook_context(input)?;
    tracing::debug!(
        cli = %context.cli_type,
        event = %context.event_type,
        raw = %context.raw_event_name,
        session = %context.session_id,
        "hook received"
    );

    let mut outcome = HookOutcome {
        context,
        event_sent: false,
        transcript_uploaded: false,
        warnings: Vec::new(),
    };
    let Some(store) = runtime.store else {
        tracing::debug!("not logged in; nothing to sync");
        return Ok(outcome);
    };

    let work = forward(store, runtime, &mut outcome);
    if tokio::time::timeout(runtime.timeout, work).await.is_err() {
        let e = SyncError::Timeout(runtime.timeout);
        tracing::warn!(error = %e, "hook network work abandoned");
        outcome.warnings.push(e.to_string());
    }
    Ok(outcome)
}

async fn forward(store: &dyn RemoteStore, runtime: &HookRuntime<'_>, outcome: &mut HookOutcome) {
    match store.send_event(&outcome.context).await {
        Ok(()) => outcome.event_sent = true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to send hook event");
            outcome.warnings.push(e.to_string());
        }
    }

    if !outcome.context.event_type.uploads_transcript() {
        return;
    }
    match upload_transcript(store, runtime, &outcome.context).await {
        Ok(uploaded) => outcome.transcript_uploaded = uploaded,
        Err(e) => {
            tracing::warn!(error = %e, "failed to upload transcript");
            outcome.warnings.push(e.to_string());
        }
    }
}

/// Upload the transcript named by `context`. A transcript that does not exist
/// yet is skipped.
async fn upload_transcript(
    store: &dyn RemoteStore,
    runtime: &HookRuntime<'_>,
    context: &NormalizedHookContext,
) -> Result<bool, SyncError> {
    let path = &context.transcript_path;
    let plaintext = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no transcript yet");
            return Ok(false);
        }
        Err(e) => return Err(SyncError::io(path, e)),
    };

    let key = if runtime.encryption_enabled {
        Some(runtime.keys.require()?)
    } else {
        None
    };
    let prepared = transfer::prepare_upload(
        &plaintext,
        key.as_ref().map(|k| k as &dyn TranscriptCipher),
    )?;

    let request = UploadRequest {
        local_session_id: context.session_id.clone(),
        machine_id: runtime.machine_id.clone(),
        content: prepared.content,
        encrypted: prepared.encrypted,
        checksum: prepared.checksum,
        cli_type: context.cli_type,
        project_path: Some(context.cwd.display().to_string()),
    };
    store.upload_transcript(&request).await?;
    tracing::info!(
        session = %context.session_id,
        bytes = prepared.size,
        encrypted = prepared.encrypted,
        "uploaded transcript"
    );
    Ok(true)
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote session store.
//!
//! [`RemoteStore`] is the only seam between the pipelines and the network.
//! [`HttpStore`] talks to the sessync service; [`MemoryStore`] keeps
//! everything in process for tests and dry runs.

pub mod auth;
pub mod http;
pub mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::event::{CliType, NormalizedHookContext};

/// Sessions requested per page.
pub const PAGE_SIZE: u32 = 50;

/// Upper bound on pages walked by [`list_all_sessions`].
const MAX_PAGES: u32 = 1000;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized; run `sessync login` again")]
    Unauthorized,

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("login code expired before it was approved")]
    ExpiredToken,

    #[error("login was denied")]
    AccessDenied,
}

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// One entry of the session listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSession {
    pub id: String,
    pub local_session_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub project_path: Option<String>,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub has_transcript: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPage {
    pub sessions: Vec<RemoteSession>,
    pub page: u32,
    pub total_pages: u32,
}

/// A stored transcript as returned by the download endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub local_session_id: String,
    #[serde(default)]
    pub project_path: Option<String>,
    /// Base64 of the transmitted bytes
    pub content: String,
    pub encrypted: bool,
    pub checksum: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_type: Option<CliType>,
}

/// Body of `POST /api/sync`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub local_session_id: String,
    pub machine_id: String,
    pub content: String,
    pub encrypted: bool,
    pub checksum: String,
    pub cli_type: CliType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

/// Body of `PUT /api/sessions/{id}/transcript`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptUpload {
    pub content: String,
    pub encrypted: bool,
    pub checksum: String,
}

/// Operations the pipelines need from the remote service.
pub trait RemoteStore: Send + Sync {
    /// One page of the session listing; pages start at 1.
    fn list_sessions(&self, page: u32) -> ApiFuture<'_, SessionPage>;

    fn download_transcript<'a>(&'a self, session_id: &'a str) -> ApiFuture<'a, TranscriptRecord>;

    fn upload_transcript<'a>(&'a self, request: &'a UploadRequest) -> ApiFuture<'a, ()>;

    /// Overwrite the transcript of an existing session.
    fn replace_transcript<'a>(
        &'a self,
        session_id: &'a str,
        upload: &'a TranscriptUpload,
    ) -> ApiFuture<'a, ()>;

    /// Forward a hook event.
    fn send_event<'a>(&'a self, event: &'a NormalizedHookContext) -> ApiFuture<'a, ()>;
}

/// Walk every page of the session listing.
pub async fn list_all_sessions(store: &dyn RemoteStore) -> Result<Vec<RemoteSession>, ApiError> {
    let mut sessions = Vec::new();
    let mut page = 1;
    loop {
        let listing = store.list_sessions(page).await?;
        tracing::debug!(
            page,
            total = listing.total_pages,
            count = listing.sessions.len(),
            "listed sessions"
        );
        let empty = listing.sessions.is_empty();
        sessions.extend(listing.sessions);
        if empty || page >= listing.total_pages || page >= MAX_PAGES {
            break;
        }
        page += 1;
    }
    Ok(sessions)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process [`RemoteStore`].

use parking_lot::Mutex;
use std::future::ready;

use super::{
    ApiError, ApiFuture, RemoteSession, RemoteStore, SessionPage, TranscriptRecord,
    TranscriptUpload, UploadRequest, PAGE_SIZE,
};
use crate::event::NormalizedHookContext;

#[derive(Clone, Debug)]
struct StoredSession {
    meta: RemoteSession,
    transcript: Option<TranscriptRecord>,
}

#[derive(Debug)]
struct State {
    sessions: Vec<StoredSession>,
    events: Vec<NormalizedHookContext>,
    page_size: u32,
    next_id: u64,
}

/// Sessions and events kept in memory, in insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            state: Mutex::new(State {
                sessions: Vec::new(),
                events: Vec::new(),
                page_size: page_size.max(1),
                next_id: 1,
            }),
        }
    }

    /// Add or replace a session directly, bypassing upload.
    pub fn insert(&self, meta: RemoteSession, transcript: Option<TranscriptRecord>) {
        let mut state = self.state.lock();
        let stored = StoredSession { meta, transcript };
        match state.sessions.iter_mut().find(|s| s.meta.id == stored.meta.id) {
            Some(existing) => *existing = stored,
            None => state.sessions.push(stored),
        }
    }

    pub fn transcript(&self, session_id: &str) -> Option<TranscriptRecord> {
        let state = self.state.lock();
        state
            .sessions
            .iter()
            .find(|s| s.meta.id == session_id)
            .and_then(|s| s.transcript.clone())
    }

    pub fn session_for_local(&self, local_session_id: &str) -> Option<RemoteSession> {
        let state = self.state.lock();
        state
            .sessions
            .iter()
            .find(|s| s.meta.local_session_id == local_session_id)
            .map(|s| s.meta.clone())
    }

    pub fn events(&self) -> Vec<NormalizedHookContext> {
        self.state.lock().events.clone()
    }

    fn page(&self, page: u32) -> SessionPage {
        let state = self.state.lock();
        let size = state.page_size as usize;
        let total_pages = state.sessions.len().div_ceil(size).max(1) as u32;
        let start = (page.max(1) as usize - 1) * size;
        let sessions = state
            .sessions
            .iter()
            .skip(start)
            .take(size)
            .map(|s| s.meta.clone())
            .collect();
        SessionPage {
            sessions,
            page,
            total_pages,
        }
    }

    fn download(&self, session_id: &str) -> Result<TranscriptRecord, ApiError> {
        self.transcript(session_id)
            .ok_or_else(|| ApiError::NotFound(format!("session {session_id}")))
    }

    fn upload(&self, request: &UploadRequest) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        let record = TranscriptRecord {
            local_session_id: request.local_session_id.clone(),
            project_path: request.project_path.clone(),
            content: request.content.clone(),
            encrypted: request.encrypted,
            checksum: request.checksum.clone(),
            size: 0,
            cli_type: Some(request.cli_type),
        };

        if let Some(existing) = state
            .sessions
            .iter_mut()
            .find(|s| s.meta.local_session_id == request.local_session_id)
        {
            existing.meta.is_encrypted = request.encrypted;
            existing.meta.has_transcript = true;
            existing.transcript = Some(record);
            return Ok(());
        }

        let id = format!("session-{}", state.next_id);
        state.next_id += 1;
        state.sessions.push(StoredSession {
            meta: RemoteSession {
                id,
                local_session_id: request.local_session_id.clone(),
                status: Some("active".to_string()),
                title: None,
                project_path: request.project_path.clone(),
                is_encrypted: request.encrypted,
                has_transcript: true,
            },
            transcript: Some(record),
        });
        Ok(())
    }

    fn replace(&self, session_id: &str, upload: &TranscriptUpload) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        let stored = state
            .sessions
            .iter_mut()
            .find(|s| s.meta.id == session_id)
            .ok_or_else(|| ApiError::NotFound(format!("session {session_id}")))?;
        let record = stored
            .transcript
            .as_mut()
            .ok_or_else(|| ApiError::NotFound(format!("transcript for {session_id}")))?;
        record.content = upload.content.clone();
        record.encrypted = upload.encrypted;
        record.checksum = upload.checksum.clone();
        stored.meta.is_encrypted = upload.encrypted;
        Ok(())
    }
}

impl RemoteStore for MemoryStore {
    fn list_sessions(&self, page: u32) -> ApiFuture<'_, SessionPage> {
        Box::pin(ready(Ok(self.page(page))))
    }

    fn download_transcript<'a>(&'a self, session_id: &'a str) -> ApiFuture<'a, TranscriptRecord> {
        Box::pin(ready(self.download(session_id)))
    }

    fn upload_transcript<'a>(&'a self, request: &'a UploadRequest) -> ApiFuture<'a, ()> {
        Box::pin(ready(self.upload(request)))
    }

    fn replace_transcript<'a>(
        &'a self,
        session_id: &'a str,
        upload: &'a TranscriptUpload,
    ) -> ApiFuture<'a, ()> {
        Box::pin(ready(self.replace(session_id, upload)))
    }

    fn send_event<'a>(&'a self, event: &'a NormalizedHookContext) -> ApiFuture<'a, ()> {
        self.state.lock().events.push(event.clone());
        Box::pin(ready(Ok(())))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

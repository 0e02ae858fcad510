// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! [`RemoteStore`] over the sessync HTTP API.

use reqwest::{Client, IntoUrl, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    ApiError, ApiFuture, RemoteStore, SessionPage, TranscriptRecord, TranscriptUpload,
    UploadRequest, PAGE_SIZE,
};
use crate::event::NormalizedHookContext;

#[derive(Debug)]
pub struct HttpStore {
    http: Client,
    base_url: String,
    token: String,
    machine_id: String,
}

/// Body of `POST /api/hooks/events`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventBody<'a> {
    #[serde(flatten)]
    event: &'a NormalizedHookContext,
    machine_id: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpStore {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        machine_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            machine_id: machine_id.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `<base>/api/sessions/<id>/transcript` with the id encoded as one segment.
    fn transcript_url(&self, session_id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "sessions", session_id, "transcript"]);
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        what: &str,
    ) -> Result<T, ApiError> {
        let response = self.authorized(self.http.get(url)).send().await?;
        let response = check(response, what).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        builder: RequestBuilder,
        body: &B,
        what: &str,
    ) -> Result<(), ApiError> {
        let response = self.authorized(builder).json(body).send().await?;
        check(response, what).await?;
        Ok(())
    }
}

impl RemoteStore for HttpStore {
    fn list_sessions(&self, page: u32) -> ApiFuture<'_, SessionPage> {
        Box::pin(async move {
            let url = self.url(&format!("/api/sessions?page={page}&limit={PAGE_SIZE}"));
            self.get_json(url, "session list").await
        })
    }

    fn download_transcript<'a>(&'a self, session_id: &'a str) -> ApiFuture<'a, TranscriptRecord> {
        Box::pin(async move {
            let url = self.transcript_url(session_id)?;
            self.get_json(url, &format!("session {session_id}")).await
        })
    }

    fn upload_transcript<'a>(&'a self, request: &'a UploadRequest) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let builder = self.http.post(self.url("/api/sync"));
            self.send_json(builder, request, "sync endpoint").await
        })
    }

    fn replace_transcript<'a>(
        &'a self,
        session_id: &'a str,
        upload: &'a TranscriptUpload,
    ) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = self.transcript_url(session_id)?;
            self.send_json(self.http.put(url), upload, &format!("session {session_id}"))
                .await
        })
    }

    fn send_event<'a>(&'a self, event: &'a NormalizedHookContext) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let body = EventBody {
                event,
                machine_id: &self.machine_id,
            };
            let builder = self.http.post(self.url("/api/hooks/events"));
            self.send_json(builder, &body, "event endpoint").await
        })
    }
}

/// Map non-success statuses to [`ApiError`].
pub(crate) async fn check(response: Response, what: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(what.to_string())),
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            })
        }
    }
}

/// Best human-readable message from an error response body.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

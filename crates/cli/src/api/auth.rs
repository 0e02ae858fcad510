// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Device authorization login (RFC 8628 style).
//!
//! The CLI asks for a device code, prints the user code and verification URL,
//! then polls the token endpoint until the user approves in a browser.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;

use super::http::check;
use super::ApiError;
use crate::time::Clock;

/// Extra delay added to the polling interval on `slow_down`.
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

const CLIENT_ID: &str = "sessync-cli";

fn default_interval() -> u64 {
    5
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeviceCode {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    #[serde(default)]
    pub verification_uri_complete: Option<String>,
    /// Seconds until `device_code` expires
    pub expires_in: u64,
    /// Minimum seconds between polls
    #[serde(default = "default_interval")]
    pub interval: u64,
}

/// One answer from the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollStatus {
    Token(String),
    Pending,
    SlowDown,
}

#[derive(Deserialize)]
struct TokenBody {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenBody {
    fn into_status(self) -> Result<PollStatus, ApiError> {
        if let Some(token) = self.access_token.filter(|t| !t.is_empty()) {
            return Ok(PollStatus::Token(token));
        }
        match self.error.as_deref() {
            Some("authorization_pending") => Ok(PollStatus::Pending),
            Some("slow_down") => Ok(PollStatus::SlowDown),
            Some("expired_token") => Err(ApiError::ExpiredToken),
            Some("access_denied") => Err(ApiError::AccessDenied),
            Some(other) => Err(ApiError::InvalidResponse(
                self.error_description.unwrap_or_else(|| other.to_string()),
            )),
            None => Err(ApiError::InvalidResponse(
                "token response has neither access_token nor error".to_string(),
            )),
        }
    }
}

#[derive(Debug)]
pub struct DeviceAuth {
    http: Client,
    base_url: String,
}

impl DeviceAuth {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn request_device_code(&self) -> Result<DeviceCode, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/auth/device/code", self.base_url))
            .json(&json!({ "client_id": CLIENT_ID }))
            .send()
            .await?;
        check(response, "device login")
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    pub async fn poll_for_token(
        &self,
        code: &DeviceCode,
        clock: &dyn Clock,
    ) -> Result<String, ApiError> {
        poll_until_token(code, clock, || self.exchange(&code.device_code)).await
    }

    async fn exchange(&self, device_code: &str) -> Result<PollStatus, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/auth/device/token", self.base_url))
            .json(&json!({
                "grant_type": "urn:ietf:params:oauth:grant-type:device_code",
                "device_code": device_code,
                "client_id": CLIENT_ID,
            }))
            .send()
            .await?;
        // Pending and slow_down arrive as 400 with an error body.
        let status = response.status();
        let text = response.text().await?;
        match serde_json::from_str::<TokenBody>(&text) {
            Ok(body) => body.into_status(),
            Err(_) => Err(ApiError::Status {
                status: status.as_u16(),
                message: super::http::error_message(status, &text),
            }),
        }
    }
}

/// Poll `exchange` at the server's interval until it yields a token or the
/// device code expires.
pub async fn poll_until_token<F, Fut>(
    code: &DeviceCode,
    clock: &dyn Clock,
    mut exchange: F,
) -> Result<String, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollStatus, ApiError>>,
{
    let deadline = clock
        .now_millis()
        .saturating_add(code.expires_in.saturating_mul(1000));
    let mut interval = Duration::from_secs(code.interval.max(1));

    loop {
        clock.sleep(interval).await;
        if clock.now_millis() > deadline {
            return Err(ApiError::ExpiredToken);
        }
        match exchange().await? {
            PollStatus::Token(token) => return Ok(token),
            PollStatus::Pending => {}
            PollStatus::SlowDown => {
                interval = interval.saturating_add(SLOW_DOWN_STEP);
                tracing::debug!(
                    interval_secs = interval.as_secs(),
                    "token endpoint asked to slow down"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Defensive, field-by-field access to raw hook stdin.
//!
//! Tools add and rename fields between releases. Only `hook_event_name` and
//! `session_id` are required; every other field is read individually and a
//! missing, null, empty or wrongly typed value reads as absent.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::{AdapterError, CliAdapter};
use crate::event::NormalizedHookContext;

/// Raw hook payload: a JSON object as received on stdin.
#[derive(Clone, Debug)]
pub struct RawPayload {
    fields: Map<String, Value>,
}

impl RawPayload {
    pub fn parse(input: &str) -> Result<Self, AdapterError> {
        let value: Value = serde_json::from_str(input.trim())
            .map_err(|e| AdapterError::InvalidPayload(e.to_string()))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(AdapterError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// A string field that must be present and non-empty.
    pub fn required_str(&self, key: &'static str) -> Result<String, AdapterError> {
        self.str(key).ok_or(AdapterError::MissingField(key))
    }

    pub fn str(&self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Any non-null value.
    pub fn value(&self, key: &str) -> Option<Value> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        }
    }

    pub fn path(&self, key: &str) -> Option<PathBuf> {
        self.str(key).map(PathBuf::from)
    }

    /// RFC 3339 timestamp, if present and well formed.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.str(key)
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Decode hook stdin into the canonical context for `adapter`.
///
/// Both supported tools use the same snake_case field names for the fields
/// that matter here; only event names and path layout differ.
pub fn normalize(
    adapter: &dyn CliAdapter,
    input: &str,
) -> Result<NormalizedHookContext, AdapterError> {
    let payload = RawPayload::parse(input)?;
    let raw_event_name = payload.required_str("hook_event_name")?;
    let session_id = payload.required_str("session_id")?;

    let cwd = payload
        .path("cwd")
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let transcript_path = payload
        .path("transcript_path")
        .unwrap_or_else(|| adapter.transcript_path(&cwd, &session_id));
    let timestamp = payload.timestamp("timestamp").unwrap_or_else(Utc::now);

    Ok(NormalizedHookContext {
        event_type: adapter.map_event_type(&raw_event_name),
        tool_name: payload.str("tool_name"),
        tool_input: payload.value("tool_input"),
        tool_response: payload.value("tool_response"),
        prompt: payload.str("prompt"),
        session_source: payload.str("source"),
        session_reason: payload.str("reason"),
        compaction_trigger: payload.str("trigger"),
        custom_instructions: payload.str("custom_instructions"),
        notification_message: payload.str("message"),
        notification_type: payload.str("notification_type"),
        cli_type: adapter.cli_type(),
        raw_event_name,
        session_id,
        transcript_path,
        cwd,
        timestamp,
        raw: payload.into_value(),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "raw_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical event model shared by every CLI adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported CLI tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CliType {
    /// Claude Code
    Claude,
    /// Gemini CLI
    Gemini,
}

impl CliType {
    pub const ALL: [CliType; 2] = [CliType::Claude, CliType::Gemini];

    /// Wire and command-line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CliType::Claude => "claude",
            CliType::Gemini => "gemini",
        }
    }
}

impl fmt::Display for CliType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CliType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "claude-code" | "claude_code" => Ok(CliType::Claude),
            "gemini" | "gemini-cli" | "gemini_cli" => Ok(CliType::Gemini),
            other => Err(format!("unknown CLI type: {}", other)),
        }
    }
}

/// Tool-agnostic lifecycle events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedEventType {
    SessionStart,
    SessionEnd,
    UserPrompt,
    /// Before a tool runs
    ToolUseStart,
    /// After a tool ran
    ToolUse,
    AgentStop,
    SubagentStop,
    ContextCompaction,
    PermissionRequest,
    Notification,
    ModelRequest,
    ModelResponse,
}

impl NormalizedEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedEventType::SessionStart => "session_start",
            NormalizedEventType::SessionEnd => "session_end",
            NormalizedEventType::UserPrompt => "user_prompt",
            NormalizedEventType::ToolUseStart => "tool_use_start",
            NormalizedEventType::ToolUse => "tool_use",
            NormalizedEventType::AgentStop => "agent_stop",
            NormalizedEventType::SubagentStop => "subagent_stop",
            NormalizedEventType::ContextCompaction => "context_compaction",
            NormalizedEventType::PermissionRequest => "permission_request",
            NormalizedEventType::Notification => "notification",
            NormalizedEventType::ModelRequest => "model_request",
            NormalizedEventType::ModelResponse => "model_response",
        }
    }

    /// Events after which the on-disk transcript is uploaded.
    pub fn uploads_transcript(&self) -> bool {
        matches!(
            self,
            NormalizedEventType::AgentStop
                | NormalizedEventType::SubagentStop
                | NormalizedEventType::ContextCompaction
                | NormalizedEventType::SessionEnd
        )
    }
}

impl fmt::Display for NormalizedEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hook invocation, normalized.
///
/// Built once per invocation by an adapter and never mutated afterwards. The
/// raw payload is kept for forensic replay.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedHookContext {
    pub event_type: NormalizedEventType,
    /// Event name as the tool sent it (e.g. `PreToolUse`, `AfterAgent`)
    pub raw_event_name: String,
    pub session_id: String,
    pub transcript_path: PathBuf,
    pub cwd: PathBuf,
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_response: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Why a session started (`startup`, `resume`, `clear`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_source: Option<String>,
    /// Why a session ended (`logout`, `prompt_input_exit`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_reason: Option<String>,
    /// `manual` or `auto`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compaction_trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,

    pub cli_type: CliType,
    pub raw: serde_json::Value,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

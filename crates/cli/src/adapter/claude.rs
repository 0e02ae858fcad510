// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Claude Code adapter.
//!
//! Layout under the config root (`CLAUDE_CONFIG_DIR` or `~/.claude`):
//!
//! ```text
//! settings.json
//! projects/<sanitized-project-path>/<session-id>.jsonl
//! ```

use std::path::{Path, PathBuf};

use super::{paths, raw, with_cd, AdapterError, CliAdapter, HookConfiguration, SettingsScope};
use crate::event::{CliType, NormalizedEventType, NormalizedHookContext};

const SUPPORTED_HOOKS: &[&str] = &[
    "SessionStart",
    "SessionEnd",
    "UserPromptSubmit",
    "PreToolUse",
    "PostToolUse",
    "Stop",
    "SubagentStop",
    "PreCompact",
    "PermissionRequest",
    "Notification",
];

const DEFAULT_HOOKS: &[&str] = &[
    "SessionStart",
    "UserPromptSubmit",
    "PostToolUse",
    "Stop",
    "SubagentStop",
    "PreCompact",
    "SessionEnd",
];

/// Todo updates are the only tool results worth syncing mid-turn.
const TODO_TOOL: &str = "TodoWrite";

#[derive(Clone, Debug)]
pub struct ClaudeAdapter {
    root: PathBuf,
}

impl ClaudeAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Result<Self, AdapterError> {
        Ok(Self::new(paths::claude_root()?))
    }

    /// `<root>/projects/<sanitized>`
    pub fn project_dir(&self, project_path: &Path) -> PathBuf {
        self.root
            .join("projects")
            .join(paths::sanitize_project_path(project_path))
    }
}

impl CliAdapter for ClaudeAdapter {
    fn cli_type(&self) -> CliType {
        CliType::Claude
    }

    fn display_name(&self) -> &'static str {
        "Claude Code"
    }

    fn config_dir(&self) -> &Path {
        &self.root
    }

    fn settings_path(
        &self,
        scope: SettingsScope,
        project_path: Option<&Path>,
    ) -> Result<PathBuf, AdapterError> {
        match scope {
            SettingsScope::User => Ok(self.root.join("settings.json")),
            SettingsScope::Project => project_path
                .map(|p| p.join(".claude").join("settings.json"))
                .ok_or(AdapterError::ProjectPathRequired),
        }
    }

    fn transcript_path(&self, project_path: &Path, session_id: &str) -> PathBuf {
        self.project_dir(project_path).join(format!("{session_id}.jsonl"))
    }

    fn supported_hooks(&self) -> &'static [&'static str] {
        SUPPORTED_HOOKS
    }

    fn default_hooks(&self) -> &'static [&'static str] {
        DEFAULT_HOOKS
    }

    fn default_matcher(&self, event: &str) -> Option<&'static str> {
        match event {
            "PostToolUse" => Some(TODO_TOOL),
            _ => None,
        }
    }

    fn hook_config(&self, command: &str) -> HookConfiguration {
        HookConfiguration::for_adapter(self, command)
    }

    fn parse_hook_context(&self, input: &str) -> Result<NormalizedHookContext, AdapterError> {
        raw::normalize(self, input)
    }

    fn map_event_type(&self, raw_event_name: &str) -> NormalizedEventType {
        match raw_event_name {
            "SessionStart" => NormalizedEventType::SessionStart,
            "SessionEnd" => NormalizedEventType::SessionEnd,
            "UserPromptSubmit" => NormalizedEventType::UserPrompt,
            "PreToolUse" => NormalizedEventType::ToolUseStart,
            "PostToolUse" => NormalizedEventType::ToolUse,
            "Stop" => NormalizedEventType::AgentStop,
            "SubagentStop" => NormalizedEventType::SubagentStop,
            "PreCompact" => NormalizedEventType::ContextCompaction,
            "PermissionRequest" => NormalizedEventType::PermissionRequest,
            "Notification" => NormalizedEventType::Notification,
            other => {
                tracing::debug!(event = other, "unknown Claude hook event");
                NormalizedEventType::Notification
            }
        }
    }

    fn resume_command(&self, session_id: &str, project_path: Option<&Path>) -> String {
        with_cd(format!("claude --resume {session_id}"), project_path)
    }
}

#[cfg(test)]
#[path = "claude_tests.rs"]
mod tests;

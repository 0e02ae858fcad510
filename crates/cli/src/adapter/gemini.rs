// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Gemini CLI adapter.
//!
//! Layout under the config root (`$GEMINI_CLI_HOME/.gemini` or `~/.gemini`):
//!
//! ```text
//! settings.json
//! tmp/<sha256(project-path)>/chats/session-<session-id>.json
//! ```
//!
//! Hooks only run when `tools.enableHooks` is set.

use serde_json::json;
use std::path::{Path, PathBuf};

use super::{
    paths, raw, with_cd, AdapterError, CliAdapter, HookConfiguration, SettingsMap, SettingsScope,
};
use crate::event::{CliType, NormalizedEventType, NormalizedHookContext};

const SUPPORTED_HOOKS: &[&str] = &[
    "SessionStart",
    "SessionEnd",
    "BeforeAgent",
    "AfterAgent",
    "BeforeModel",
    "AfterModel",
    "BeforeToolSelection",
    "BeforeTool",
    "AfterTool",
    "PreCompress",
    "Notification",
];

const DEFAULT_HOOKS: &[&str] = &[
    "SessionStart",
    "BeforeAgent",
    "AfterTool",
    "AfterAgent",
    "PreCompress",
    "SessionEnd",
];

const TODO_TOOL: &str = "write_todos";

#[derive(Clone, Debug)]
pub struct GeminiAdapter {
    root: PathBuf,
}

impl GeminiAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Result<Self, AdapterError> {
        Ok(Self::new(paths::gemini_root()?))
    }

    /// `<root>/tmp/<hash>/chats`
    pub fn chats_dir(&self, project_path: &Path) -> PathBuf {
        self.root
            .join("tmp")
            .join(paths::project_hash(project_path))
            .join("chats")
    }

    /// Settings that must be on for Gemini to run hooks.
    pub fn hooks_enabled_settings() -> SettingsMap {
        let mut settings = SettingsMap::new();
        settings.insert("tools".to_string(), json!({ "enableHooks": true }));
        settings
    }
}

impl CliAdapter for GeminiAdapter {
    fn cli_type(&self) -> CliType {
        CliType::Gemini
    }

    fn display_name(&self) -> &'static str {
        "Gemini CLI"
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
                .map(|p| p.join(".gemini").join("settings.json"))
                .ok_or(AdapterError::ProjectPathRequired),
        }
    }

    fn transcript_path(&self, project_path: &Path, session_id: &str) -> PathBuf {
        self.chats_dir(project_path).join(format!("session-{session_id}.json"))
    }

    fn supported_hooks(&self) -> &'static [&'static str] {
        SUPPORTED_HOOKS
    }

    fn default_hooks(&self) -> &'static [&'static str] {
        DEFAULT_HOOKS
    }

    fn default_matcher(&self, event: &str) -> Option<&'static str> {
        match event {
            "AfterTool" => Some(TODO_TOOL),
            _ => None,
        }
    }

    fn hook_config(&self, command: &str) -> HookConfiguration {
        HookConfiguration::for_adapter(self, command)
            .experimental()
            .with_additional_settings(Self::hooks_enabled_settings())
    }

    fn parse_hook_context(&self, input: &str) -> Result<NormalizedHookContext, AdapterError> {
        raw::normalize(self, input)
    }

    fn map_event_type(&self, raw_event_name: &str) -> NormalizedEventType {
        match raw_event_name {
            "SessionStart" => NormalizedEventType::SessionStart,
            "SessionEnd" => NormalizedEventType::SessionEnd,
            "BeforeAgent" => NormalizedEventType::UserPrompt,
            "AfterAgent" => NormalizedEventType::AgentStop,
            "BeforeTool" => NormalizedEventType::ToolUseStart,
            "AfterTool" => NormalizedEventType::ToolUse,
            "PreCompress" => NormalizedEventType::ContextCompaction,
            "BeforeModel" | "BeforeToolSelection" => NormalizedEventType::ModelRequest,
            "AfterModel" => NormalizedEventType::ModelResponse,
            "Notification" => NormalizedEventType::Notification,
            other => {
                tracing::debug!(event = other, "unknown Gemini hook event");
                NormalizedEventType::Notification
            }
        }
    }

    fn resume_command(&self, session_id: &str, project_path: Option<&Path>) -> String {
        with_cd(format!("gemini --resume {session_id}"), project_path)
    }
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI adapters.
//!
//! Each supported tool implements [`CliAdapter`]: where it keeps settings and
//! transcripts, which hook events it emits, how its hook stdin looks, and how
//! a user resumes a session. Pipelines only talk to the trait; adding a tool
//! means adding an implementation, not touching shared code.

pub mod claude;
pub mod gemini;
pub mod paths;
pub mod raw;
pub mod settings;

pub use claude::ClaudeAdapter;
pub use gemini::GeminiAdapter;
pub use settings::SettingsMap;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::event::{CliType, NormalizedEventType, NormalizedHookContext};

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("hook payload is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid hook payload: {0}")]
    InvalidPayload(String),

    #[error("project scope requires a project path")]
    ProjectPathRequired,

    #[error("could not determine home directory")]
    HomeNotFound,

    #[error("settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    #[error("settings file {path} must contain a JSON object")]
    NotAnObject { path: PathBuf },
}

/// Where a settings change applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SettingsScope {
    /// The user-global settings file
    User,
    /// The settings file inside one project directory
    Project,
}

impl SettingsScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsScope::User => "user",
            SettingsScope::Project => "project",
        }
    }
}

/// A single command action inside a hook entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub command: String,
}

impl HookAction {
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            action_type: "command".to_string(),
            command: command.into(),
        }
    }
}

/// One element of a hook event's list in a settings file.
///
/// ```json
/// {"matcher": "TodoWrite", "hooks": [{"type": "command", "command": "sessync hook claude"}]}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Tool-name filter; absent means the hook fires for every occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    #[serde(default)]
    pub hooks: Vec<HookAction>,
}

impl HookEntry {
    /// True when this entry has the same matcher and runs `command`.
    pub fn runs(&self, command: &str, matcher: Option<&str>) -> bool {
        self.matcher.as_deref() == matcher && self.hooks.iter().any(|h| h.command == command)
    }
}

/// Everything an adapter needs written into its settings file.
#[derive(Clone, Debug, PartialEq)]
pub struct HookConfiguration {
    /// Hook entries keyed by the tool's raw event name
    pub hooks: BTreeMap<String, Vec<HookEntry>>,
    /// Extra settings that must be present for hooks to run at all
    pub additional_settings: Option<SettingsMap>,
    /// The tool's hook support is still behind a feature flag
    pub experimental: bool,
}

impl HookConfiguration {
    /// Build the configuration for an adapter's default hooks.
    pub fn for_adapter(adapter: &dyn CliAdapter, command: &str) -> Self {
        let hooks = adapter
            .default_hooks()
            .iter()
            .map(|event| {
                let entry = adapter.create_hook_entry(command, adapter.default_matcher(event));
                (event.to_string(), vec![entry])
            })
            .collect();
        Self {
            hooks,
            additional_settings: None,
            experimental: false,
        }
    }

    pub fn with_additional_settings(mut self, settings: SettingsMap) -> Self {
        self.additional_settings = Some(settings);
        self
    }

    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }
}

/// Capability set every supported CLI tool provides.
pub trait CliAdapter: Send + Sync {
    fn cli_type(&self) -> CliType;

    /// Human-readable tool name
    fn display_name(&self) -> &'static str;

    /// The tool's own configuration directory (`~/.claude`, `~/.gemini`)
    fn config_dir(&self) -> &Path;

    /// Best-effort check: the tool's config directory exists.
    fn is_installed(&self) -> bool {
        self.config_dir().is_dir()
    }

    /// The settings file the tool reads hooks from.
    fn settings_path(
        &self,
        scope: SettingsScope,
        project_path: Option<&Path>,
    ) -> Result<PathBuf, AdapterError>;

    /// Where the tool itself stores the transcript of `session_id` for a project.
    fn transcript_path(&self, project_path: &Path, session_id: &str) -> PathBuf;

    /// Every raw hook event name the tool emits.
    fn supported_hooks(&self) -> &'static [&'static str];

    /// The subset wired for sync.
    fn default_hooks(&self) -> &'static [&'static str];

    /// Matcher used when wiring `event`, if the hook must be restricted.
    fn default_matcher(&self, event: &str) -> Option<&'static str>;

    fn hook_config(&self, command: &str) -> HookConfiguration;

    fn create_hook_entry(&self, command: &str, matcher: Option<&str>) -> HookEntry {
        HookEntry {
            matcher: matcher.map(str::to_string),
            hooks: vec![HookAction::command(command)],
        }
    }

    /// Read a settings file; missing or unparseable files read as empty.
    fn read_settings(&self, path: &Path) -> SettingsMap {
        settings::read_settings(path)
    }

    /// Merge `updates` over the settings file at `path`.
    fn write_settings(&self, path: &Path, updates: &SettingsMap) -> Result<(), AdapterError> {
        settings::write_settings(path, updates)
    }

    /// Decode the tool's hook stdin into the canonical context.
    fn parse_hook_context(&self, input: &str) -> Result<NormalizedHookContext, AdapterError>;

    /// Map a raw event name; unknown names become `Notification`.
    fn map_event_type(&self, raw_event_name: &str) -> NormalizedEventType;

    /// Shell command a user runs to resume a session. Display only.
    fn resume_command(&self, session_id: &str, project_path: Option<&Path>) -> String;
}

/// Build the adapter for `cli_type`, rooted at its resolved config directory.
pub fn adapter_for(cli_type: CliType) -> Result<Box<dyn CliAdapter>, AdapterError> {
    Ok(match cli_type {
        CliType::Claude => Box::new(ClaudeAdapter::from_env()?),
        CliType::Gemini => Box::new(GeminiAdapter::from_env()?),
    })
}

/// Adapters for every supported tool.
pub fn all_adapters() -> Result<Vec<Box<dyn CliAdapter>>, AdapterError> {
    CliType::ALL.into_iter().map(adapter_for).collect()
}

/// Prefix a resume command with a `cd` into the project, when known.
pub(crate) fn with_cd(command: String, project_path: Option<&Path>) -> String {
    match project_path {
        Some(path) => format!("cd \"{}\" && {}", path.display(), command),
        None => command,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Installs sync hooks into a tool's settings file.
//!
//! The settings file is read strictly so a file the user broke by hand is
//! reported instead of overwritten. Existing entries, including unrelated
//! hooks on the same events, are left in place.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::adapter::settings::{self, SettingsMap};
use crate::adapter::{AdapterError, CliAdapter, HookEntry, SettingsScope};
use crate::event::CliType;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("refusing to modify {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    #[error("malformed `hooks` section in {path}")]
    InvalidHooksSection { path: PathBuf },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// What `install_hooks` did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub settings_path: PathBuf,
    /// Events that received a new entry
    pub added: Vec<String>,
    /// Events whose entry was already present
    pub skipped: Vec<String>,
    /// Tool hook support is experimental
    pub experimental: bool,
}

impl InstallReport {
    pub fn changed(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Command a tool runs for every sync hook.
pub fn sync_command(cli_type: CliType) -> String {
    format!("sessync hook {cli_type}")
}

/// Merge the adapter's sync hooks into its settings file.
pub fn install_hooks(
    adapter: &dyn CliAdapter,
    scope: SettingsScope,
    project_path: Option<&Path>,
) -> Result<InstallReport, InstallError> {
    let path = adapter.settings_path(scope, project_path)?;
    let mut settings = load_strict(&path)?;
    let config = adapter.hook_config(&sync_command(adapter.cli_type()));

    let mut report = InstallReport {
        settings_path: path.clone(),
        experimental: config.experimental,
        ..Default::default()
    };

    {
        let hooks = hooks_section(&mut settings, &path)?;
        for (event, entries) in &config.hooks {
            let list = event_list(hooks, event, &path)?;
            for entry in entries {
                if list_contains(list, entry) {
                    report.skipped.push(event.clone());
                    continue;
                }
                let value = serde_json::to_value(entry).map_err(|e| {
                    InstallError::InvalidSettings {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                list.push(value);
                report.added.push(event.clone());
            }
        }
    }

    if let Some(extra) = &config.additional_settings {
        settings::merge_additional_settings(&mut settings, extra);
    }

    settings::save_settings(&path, &settings)?;
    tracing::info!(
        cli = %adapter.cli_type(),
        path = %path.display(),
        added = report.added.len(),
        skipped = report.skipped.len(),
        "installed hooks"
    );
    Ok(report)
}

/// Every default hook carries the sync entry with the expected matcher.
pub fn hooks_installed(
    adapter: &dyn CliAdapter,
    scope: SettingsScope,
    project_path: Option<&Path>,
) -> bool {
    let Ok(path) = adapter.settings_path(scope, project_path) else {
        return false;
    };
    let settings = adapter.read_settings(&path);
    let Some(Value::Object(hooks)) = settings.get("hooks") else {
        return false;
    };
    let config = adapter.hook_config(&sync_command(adapter.cli_type()));

    config.hooks.iter().all(|(event, entries)| {
        let Some(Value::Array(list)) = hooks.get(event) else {
            return false;
        };
        entries.iter().all(|entry| list_contains(list, entry))
    })
}

/// Remove sync commands from every hook list. Returns the number of commands removed.
pub fn uninstall_hooks(
    adapter: &dyn CliAdapter,
    scope: SettingsScope,
    project_path: Option<&Path>,
) -> Result<usize, InstallError> {
    let path = adapter.settings_path(scope, project_path)?;
    if !path.exists() {
        return Ok(0);
    }
    let mut settings = load_strict(&path)?;
    let command = sync_command(adapter.cli_type());

    let Some(Value::Object(hooks)) = settings.get_mut("hooks") else {
        return Ok(0);
    };

    let mut removed = 0;
    for list in hooks.values_mut() {
        let Value::Array(entries) = list else {
            continue;
        };
        for entry in entries.iter_mut() {
            let Some(Value::Array(actions)) = entry.get_mut("hooks") else {
                continue;
            };
            let before = actions.len();
            actions.retain(|action| {
                action.get("command").and_then(Value::as_str) != Some(command.as_str())
            });
            removed += before - actions.len();
        }
        entries.retain(|entry| {
            !matches!(entry.get("hooks"), Some(Value::Array(actions)) if actions.is_empty())
        });
    }
    hooks.retain(|_, list| !matches!(list, Value::Array(entries) if entries.is_empty()));

    if removed > 0 {
        settings::save_settings(&path, &settings)?;
        tracing::info!(cli = %adapter.cli_type(), path = %path.display(), removed, "removed hooks");
    }
    Ok(removed)
}

fn load_strict(path: &Path) -> Result<SettingsMap, InstallError> {
    settings::load_settings(path).map_err(|e| match e {
        AdapterError::InvalidSettings { path, message } => {
            InstallError::InvalidSettings { path, message }
        }
        AdapterError::NotAnObject { path } => InstallError::InvalidSettings {
            path,
            message: "expected a JSON object".to_string(),
        },
        other => InstallError::Adapter(other),
    })
}

fn hooks_section<'a>(
    settings: &'a mut SettingsMap,
    path: &Path,
) -> Result<&'a mut SettingsMap, InstallError> {
    let hooks = settings
        .entry("hooks")
        .or_insert_with(|| Value::Object(SettingsMap::new()));
    match hooks {
        Value::Object(map) => Ok(map),
        _ => Err(InstallError::InvalidHooksSection {
            path: path.to_path_buf(),
        }),
    }
}

fn event_list<'a>(
    hooks: &'a mut SettingsMap,
    event: &str,
    path: &Path,
) -> Result<&'a mut Vec<Value>, InstallError> {
    match hooks
        .entry(event)
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(list) => Ok(list),
        _ => Err(InstallError::InvalidHooksSection {
            path: path.to_path_buf(),
        }),
    }
}

fn list_contains(list: &[Value], wanted: &HookEntry) -> bool {
    let Some(command) = wanted.hooks.first().map(|h| h.command.as_str()) else {
        return false;
    };
    list.iter()
        .filter_map(|value| serde_json::from_value::<HookEntry>(value.clone()).ok())
        .any(|entry| entry.runs(command, wanted.matcher.as_deref()))
}

#[cfg(test)]
#[path = "installer_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reading and writing the tools' JSON settings files.
//!
//! Settings files belong to the user. Keys sessync does not own are carried
//! through verbatim and in their original order.

use serde_json::Value;
use std::path::Path;

use super::AdapterError;
use crate::fsio;

/// A settings file's top-level object.
pub type SettingsMap = serde_json::Map<String, Value>;

/// Lenient read: a missing or unparseable file reads as empty.
pub fn read_settings(path: &Path) -> SettingsMap {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            SettingsMap::new()
        }
    }
}

/// Strict read: a missing file is empty, anything unparseable is an error.
pub fn load_settings(path: &Path) -> Result<SettingsMap, AdapterError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SettingsMap::new()),
        Err(source) => {
            return Err(AdapterError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(SettingsMap::new());
    }

    let value: Value =
        fsio::parse_json5_or_json(&content).map_err(|e| AdapterError::InvalidSettings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AdapterError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Merge `updates` over the file on disk and write the result back.
pub fn write_settings(path: &Path, updates: &SettingsMap) -> Result<(), AdapterError> {
    let mut settings = read_settings(path);
    for (key, value) in updates {
        settings.insert(key.clone(), value.clone());
    }
    save_settings(path, &settings)
}

/// Replace the file with `settings` as pretty JSON.
pub fn save_settings(path: &Path, settings: &SettingsMap) -> Result<(), AdapterError> {
    let mut content = serde_json::to_string_pretty(settings).map_err(|e| {
        AdapterError::InvalidSettings {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    content.push('\n');
    fsio::write_atomic(path, content.as_bytes()).map_err(|source| AdapterError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge `extra` into `settings` one level deep.
///
/// When both sides hold an object under the same key the inner keys are merged;
/// any other value replaces what was there.
pub fn merge_additional_settings(settings: &mut SettingsMap, extra: &SettingsMap) {
    for (key, value) in extra {
        match (settings.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                for (inner_key, inner_value) in incoming {
                    existing.insert(inner_key.clone(), inner_value.clone());
                }
            }
            _ => {
                settings.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::adapter::{ClaudeAdapter, GeminiAdapter};
use serde_json::json;
use tempfile::TempDir;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_sync_command() {
    assert_eq!(sync_command(CliType::Claude), "sessync hook claude");
    assert_eq!(sync_command(CliType::Gemini), "sessync hook gemini");
}

#[test]
fn test_install_into_missing_file_creates_it() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path().join(".claude"));

    let report = install_hooks(&adapter, SettingsScope::User, None).unwrap();

    assert_eq!(report.settings_path, dir.path().join(".claude/settings.json"));
    assert_eq!(report.added.len(), 7);
    assert!(report.skipped.is_empty());
    assert!(!report.experimental);
    let written = read_json(&report.settings_path);
    assert_eq!(
        written["hooks"]["PostToolUse"],
        json!([{"matcher": "TodoWrite", "hooks": [{"type": "command", "command": "sessync hook claude"}]}])
    );
    assert!(hooks_installed(&adapter, SettingsScope::User, None));
}

#[test]
fn test_install_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());

    install_hooks(&adapter, SettingsScope::User, None).unwrap();
    let first = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    let report = install_hooks(&adapter, SettingsScope::User, None).unwrap();
    let second = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();

    assert!(!report.changed());
    assert_eq!(report.skipped.len(), 7);
    assert_eq!(first, second);
}

#[test]
fn test_install_preserves_unrelated_keys_and_hooks() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        json!({
            "theme": "dark",
            "permissions": {"allow": ["Bash(ls)"]},
            "hooks": {
                "Stop": [{"hooks": [{"type": "command", "command": "notify-send done"}]}],
                "PreToolUse": [{"matcher": "Bash", "hooks": [{"type": "command", "command": "audit"}]}]
            }
        })
        .to_string(),
    )
    .unwrap();

    install_hooks(&adapter, SettingsScope::User, None).unwrap();

    let written = read_json(&path);
    assert_eq!(written["theme"], "dark");
    assert_eq!(written["permissions"], json!({"allow": ["Bash(ls)"]}));
    assert_eq!(written["hooks"]["PreToolUse"][0]["hooks"][0]["command"], "audit");
    let stop = written["hooks"]["Stop"].as_array().unwrap();
    assert_eq!(stop.len(), 2);
    assert_eq!(stop[0]["hooks"][0]["command"], "notify-send done");
    assert_eq!(stop[1]["hooks"][0]["command"], "sessync hook claude");
    let keys: Vec<_> = written.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys[..2], ["theme".to_string(), "permissions".to_string()]);
}

#[test]
fn test_install_adds_entry_when_matcher_differs() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        json!({"hooks": {"PostToolUse": [{"hooks": [{"type": "command", "command": "sessync hook claude"}]}]}})
            .to_string(),
    )
    .unwrap();

    let report = install_hooks(&adapter, SettingsScope::User, None).unwrap();

    assert!(report.added.contains(&"PostToolUse".to_string()));
    assert_eq!(read_json(&path)["hooks"]["PostToolUse"].as_array().unwrap().len(), 2);
}

#[test]
fn test_install_refuses_unparseable_settings() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ \"theme\": ").unwrap();

    let err = install_hooks(&adapter, SettingsScope::User, None).unwrap_err();

    assert!(matches!(err, InstallError::InvalidSettings { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"theme\": ");
}

#[test]
fn test_install_refuses_malformed_hooks_section() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());
    std::fs::write(dir.path().join("settings.json"), r#"{"hooks": []}"#).unwrap();

    assert!(matches!(
        install_hooks(&adapter, SettingsScope::User, None),
        Err(InstallError::InvalidHooksSection { .. })
    ));
}

#[test]
fn test_install_gemini_merges_enable_hooks() {
    let dir = TempDir::new().unwrap();
    let adapter = GeminiAdapter::new(dir.path());
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"tools": {"sandbox": "docker"}, "model": "pro"}"#).unwrap();

    let report = install_hooks(&adapter, SettingsScope::User, None).unwrap();

    assert!(report.experimental);
    assert_eq!(report.added.len(), 6);
    let written = read_json(&path);
    assert_eq!(
        written["tools"],
        json!({"sandbox": "docker", "enableHooks": true})
    );
    assert_eq!(written["model"], "pro");
    assert_eq!(
        written["hooks"]["AfterTool"][0]["matcher"],
        "write_todos"
    );
}

#[test]
fn test_install_project_scope() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("app");
    let adapter = ClaudeAdapter::new(dir.path().join("home"));

    let report = install_hooks(&adapter, SettingsScope::Project, Some(&project)).unwrap();

    assert_eq!(report.settings_path, project.join(".claude/settings.json"));
    assert!(report.settings_path.exists());
    assert!(!hooks_installed(&adapter, SettingsScope::User, None));
    assert!(hooks_installed(&adapter, SettingsScope::Project, Some(&project)));
}

#[test]
fn test_install_project_scope_requires_path() {
    let adapter = ClaudeAdapter::new("/nowhere");
    assert!(matches!(
        install_hooks(&adapter, SettingsScope::Project, None),
        Err(InstallError::Adapter(AdapterError::ProjectPathRequired))
    ));
}

#[test]
fn test_hooks_installed_detects_partial_install() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());
    let path = dir.path().join("settings.json");
    install_hooks(&adapter, SettingsScope::User, None).unwrap();

    let mut written = read_json(&path);
    written["hooks"].as_object_mut().unwrap().remove("Stop");
    std::fs::write(&path, written.to_string()).unwrap();

    assert!(!hooks_installed(&adapter, SettingsScope::User, None));
}

#[test]
fn test_uninstall_removes_only_sync_commands() {
    let dir = TempDir::new().unwrap();
    let adapter = ClaudeAdapter::new(dir.path());
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        json!({
            "theme": "dark",
            "hooks": {"Stop": [{"hooks": [{"type": "command", "command": "notify-send done"}]}]}
        })
        .to_string(),
    )
    .unwrap();
    install_hooks(&adapter, SettingsScope::User, None).unwrap();

    let removed = uninstall_hooks(&adapter, SettingsScope::User, None).unwrap();

    assert_eq!(removed, 7);
    let written = read_json(&path);
    assert_eq!(written["theme"], "dark");
    assert_eq!(
        written["hooks"],
        json!({"Stop": [{"hooks": [{"type": "command", "command": "notify-send done"}]}]})
    );
    assert!(!hooks_installed(&adapter, SettingsScope::User, None));
}

#[test]
fn test_uninstall_missing_file_is_noop() {
    let dir = TempDir::new().unwrap();
    let adapter = GeminiAdapter::new(dir.path());
    assert_eq!(uninstall_hooks(&adapter, SettingsScope::User, None).unwrap(), 0);
    assert!(!dir.path().join("settings.json").exists());
}

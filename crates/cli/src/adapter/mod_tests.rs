// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;
use crate::test_env::EnvGuard;

#[test]
fn test_hook_entry_wire_shape() {
    let entry = HookEntry {
        matcher: Some("TodoWrite".to_string()),
        hooks: vec![HookAction::command("sessync hook claude")],
    };
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({"matcher": "TodoWrite", "hooks": [{"type": "command", "command": "sessync hook claude"}]})
    );

    let bare = HookEntry {
        matcher: None,
        hooks: vec![HookAction::command("x")],
    };
    assert_eq!(
        serde_json::to_value(&bare).unwrap(),
        json!({"hooks": [{"type": "command", "command": "x"}]})
    );
}

#[test]
fn test_hook_entry_parses_without_matcher() {
    let entry: HookEntry =
        serde_json::from_value(json!({"hooks": [{"type": "command", "command": "x"}]})).unwrap();
    assert_eq!(entry.matcher, None);
    assert!(entry.runs("x", None));
}

#[test]
fn test_hook_entry_runs_requires_matching_matcher() {
    let entry =
        ClaudeAdapter::new("/c").create_hook_entry("sessync hook claude", Some("TodoWrite"));
    assert!(entry.runs("sessync hook claude", Some("TodoWrite")));
    assert!(!entry.runs("sessync hook claude", None));
    assert!(!entry.runs("other", Some("TodoWrite")));
}

#[test]
fn test_hook_configuration_is_deterministic() {
    let adapter = GeminiAdapter::new("/g");
    assert_eq!(
        adapter.hook_config("sessync hook gemini"),
        adapter.hook_config("sessync hook gemini")
    );
}

#[test]
fn test_with_cd() {
    assert_eq!(with_cd("run".to_string(), None), "run");
    assert_eq!(
        with_cd("run".to_string(), Some(Path::new("/a b"))),
        "cd \"/a b\" && run"
    );
}

#[test]
fn test_adapter_for_uses_env_roots() {
    let mut guard = EnvGuard::lock();
    guard.set(crate::env::CLAUDE_CONFIG_DIR, "/tmp/claude-root")
        .set(crate::env::GEMINI_CLI_HOME, "/tmp/gemini-home");

    let claude = adapter_for(CliType::Claude).unwrap();
    let gemini = adapter_for(CliType::Gemini).unwrap();
    let all = all_adapters().unwrap();

    assert_eq!(claude.cli_type(), CliType::Claude);
    assert_eq!(claude.config_dir(), Path::new("/tmp/claude-root"));
    assert_eq!(gemini.config_dir(), Path::new("/tmp/gemini-home/.gemini"));
    let types: Vec<_> = all.iter().map(|a| a.cli_type()).collect();
    assert_eq!(types, vec![CliType::Claude, CliType::Gemini]);
}

#[test]
fn test_scope_names() {
    assert_eq!(SettingsScope::User.as_str(), "user");
    assert_eq!(SettingsScope::Project.as_str(), "project");
}

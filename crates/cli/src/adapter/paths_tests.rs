// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::test_env::EnvGuard;
use yare::parameterized;

#[parameterized(
    unix = { "/Users/foo/bar", "-Users-foo-bar" },
    dotted = { "/home/dev/my.project", "-home-dev-my-project" },
    underscore_and_space = { "/tmp/my_app v2", "-tmp-my-app-v2" },
    windows_drive = { "D:\\sources\\foo", "D--sources-foo" },
    relative = { "relative/path", "relative-path" },
)]
fn sanitize_fixture(input: &str, expected: &str) {
    assert_eq!(sanitize_project_path(Path::new(input)), expected);
}

#[test]
fn test_sanitize_replaces_non_ascii() {
    assert_eq!(sanitize_project_path(Path::new("/tmp/café")), "-tmp-caf-");
}

#[parameterized(
    unix = { "/Users/foo/bar", "18084fc24f8f8853e9286382e140dbafdf5a27e6607e8abfa67a7b86182a9ce7" },
    windows_drive = { "D:\\sources\\foo", "54ce79102f1e84cb59253e1af3578de64267a659b225521946bc84e73e41b13a" },
    dotted = { "/home/dev/my.project", "85d89620500df35dd6f5103d9d31d1a8137e2e6c831b4221f77d702295bfd942" },
)]
fn project_hash_fixture(input: &str, expected: &str) {
    assert_eq!(project_hash(Path::new(input)), expected);
}

#[test]
fn test_basename() {
    assert_eq!(basename(Path::new("/a/b/project")).as_deref(), Some("project"));
    assert_eq!(basename(Path::new("/")), None);
}

#[test]
fn test_claude_root_prefers_config_dir() {
    let mut guard = EnvGuard::lock();
    guard.set(env::CLAUDE_CONFIG_DIR, "/opt/claude-config");
    assert_eq!(claude_root().unwrap(), PathBuf::from("/opt/claude-config"));
}

#[test]
fn test_gemini_root_uses_cli_home() {
    let mut guard = EnvGuard::lock();
    guard.set(env::GEMINI_CLI_HOME, "/opt/gemini-home");
    assert_eq!(gemini_root().unwrap(), PathBuf::from("/opt/gemini-home/.gemini"));
}

proptest::proptest! {
    #[test]
    fn sanitized_is_flat_and_same_length(input in "\\PC{0,64}") {
        let sanitized = sanitize_project_path(Path::new(&input));
        proptest::prop_assert_eq!(sanitized.chars().count(), input.chars().count());
        proptest::prop_assert!(sanitized.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn project_hash_is_lowercase_sha256(input in "\\PC{0,64}") {
        let hash = project_hash(Path::new(&input));
        proptest::prop_assert_eq!(hash.len(), 64);
        proptest::prop_assert!(hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}

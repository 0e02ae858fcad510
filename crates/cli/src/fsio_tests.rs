// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::Value;

#[test]
fn test_parse_json5_accepts_comments() {
    let value: Value = parse_json5_or_json("{ // comment\n \"a\": 1, }").unwrap();
    assert_eq!(value["a"], 1);
}

#[test]
fn test_parse_json_fallback() {
    let value: Value = parse_json5_or_json(r#"{"a": [1, 2]}"#).unwrap();
    assert_eq!(value["a"][1], 2);
}

#[test]
fn test_write_atomic_creates_parents() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("a/b/c.txt");
    write_atomic(&path, b"content").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"content");
}

#[test]
fn test_write_atomic_replaces_existing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("file.txt");
    std::fs::write(&path, b"a much longer original body").unwrap();
    write_atomic(&path, b"short").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"short");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("file.txt");
    write_atomic(&path, b"one").unwrap();
    write_atomic(&path, b"two").unwrap();
    let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_write_private_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("secret.key");
    std::fs::write(&path, b"old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    write_private(&path, b"new").unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn test_write_atomic_keeps_existing_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, b"{}").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    write_atomic(&path, b"{\"a\":1}").unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

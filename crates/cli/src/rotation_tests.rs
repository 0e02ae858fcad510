// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::api::{MemoryStore, TranscriptRecord};
use crate::transfer::{open_payload, prepare_upload};
use tempfile::TempDir;

fn enabled() -> Config {
    Config {
        encryption_enabled: true,
        ..Default::default()
    }
}

fn seed(store: &MemoryStore, id: &str, plaintext: &[u8], key: &EncryptionKey) {
    let prepared = prepare_upload(plaintext, Some(key)).unwrap();
    store.insert(
        RemoteSession {
            id: id.to_string(),
            local_session_id: format!("local-{id}"),
            status: Some("active".to_string()),
            title: None,
            project_path: None,
            is_encrypted: true,
            has_transcript: true,
        },
        Some(TranscriptRecord {
            local_session_id: format!("local-{id}"),
            project_path: None,
            content: prepared.content,
            encrypted: true,
            checksum: prepared.checksum,
            size: prepared.size as u64,
            cli_type: None,
        }),
    );
}

fn corrupt_checksum(store: &MemoryStore, id: &str) -> String {
    let mut record = store.transcript(id).unwrap();
    let good = std::mem::replace(&mut record.checksum, "0".repeat(64));
    let meta = store.session_for_local(&record.local_session_id).unwrap();
    store.insert(meta, Some(record));
    good
}

fn restore_checksum(store: &MemoryStore, id: &str, checksum: String) {
    let mut record = store.transcript(id).unwrap();
    record.checksum = checksum;
    let meta = store.session_for_local(&record.local_session_id).unwrap();
    store.insert(meta, Some(record));
}

fn read_with(store: &MemoryStore, id: &str, key: &EncryptionKey) -> Result<Vec<u8>, SyncError> {
    let record = store.transcript(id).unwrap();
    open_payload(&record.content, &record.checksum, record.encrypted, || Ok(key.clone()))
}

#[tokio::test]
async fn one_failure_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let old = keys.generate().unwrap();
    let store = MemoryStore::new();
    seed(&store, "s1", b"first", &old);
    seed(&store, "s2", b"second", &old);
    seed(&store, "s3", b"third", &old);
    corrupt_checksum(&store, "s2");

    let report = rotate_key(&store, &keys, &enabled(), false).await.unwrap();

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.error_count(), 1);
    assert!(!report.resumed);
    let failed = &report.results[1];
    assert_eq!(failed.session_id, "s2");
    assert!(failed.error.as_deref().unwrap().contains("checksum mismatch"));

    let new = keys.require().unwrap();
    assert_ne!(new, old);
    assert_eq!(report.new_fingerprint, new.fingerprint());
    assert_eq!(read_with(&store, "s1", &new).unwrap(), b"first");
    assert_eq!(read_with(&store, "s3", &new).unwrap(), b"third");
    assert!(matches!(
        read_with(&store, "s1", &old),
        Err(SyncError::WrongKeyOrCorrupt { .. })
    ));
    assert_eq!(keys.load_previous().unwrap(), vec![old]);
    assert_eq!(report.retired_keys, 1);
}

#[tokio::test]
async fn rerun_finishes_an_interrupted_rotation() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let old = keys.generate().unwrap();
    let store = MemoryStore::new();
    seed(&store, "s1", b"first", &old);
    seed(&store, "s2", b"second", &old);
    let good = corrupt_checksum(&store, "s2");
    let first = rotate_key(&store, &keys, &enabled(), false).await.unwrap();
    assert_eq!(first.error_count(), 1);
    restore_checksum(&store, "s2", good);

    let second = rotate_key(&store, &keys, &enabled(), false).await.unwrap();

    assert!(second.resumed);
    assert!(second.is_complete());
    assert_eq!(second.new_fingerprint, first.new_fingerprint);
    let new = keys.require().unwrap();
    assert_eq!(read_with(&store, "s1", &new).unwrap(), b"first");
    assert_eq!(read_with(&store, "s2", &new).unwrap(), b"second");
    assert!(keys.load_previous().unwrap().is_empty());
}

#[tokio::test]
async fn skips_plain_and_empty_sessions() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let old = keys.generate().unwrap();
    let store = MemoryStore::new();
    seed(&store, "enc", b"x", &old);
    store.insert(
        RemoteSession {
            id: "plain".to_string(),
            local_session_id: "local-plain".to_string(),
            status: None,
            title: None,
            project_path: None,
            is_encrypted: false,
            has_transcript: true,
        },
        None,
    );
    store.insert(
        RemoteSession {
            id: "empty".to_string(),
            local_session_id: "local-empty".to_string(),
            status: None,
            title: None,
            project_path: None,
            is_encrypted: true,
            has_transcript: false,
        },
        None,
    );

    let report = rotate_key(&store, &keys, &enabled(), false).await.unwrap();

    let ids: Vec<_> = report.results.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, ["enc"]);
    assert!(report.is_complete());
}

#[tokio::test]
async fn zero_sessions_still_rotates_key() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let old = keys.generate().unwrap();

    let report = rotate_key(&MemoryStore::new(), &keys, &enabled(), false).await.unwrap();

    assert!(report.results.is_empty());
    let new = keys.require().unwrap();
    assert_ne!(new, old);
    assert_eq!(report.new_fingerprint, new.fingerprint());
    assert!(keys.load_previous().unwrap().is_empty());
}

#[tokio::test]
async fn requires_encryption_enabled() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let old = keys.generate().unwrap();

    let err = rotate_key(&MemoryStore::new(), &keys, &Config::default(), false)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::EncryptionDisabled));
    assert_eq!(keys.require().unwrap(), old);
}

#[tokio::test]
async fn requires_existing_key() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));

    let err = rotate_key(&MemoryStore::new(), &keys, &enabled(), false).await.unwrap_err();

    assert!(matches!(err, SyncError::KeyMissing { .. }));
    assert!(!keys.exists());
}

#[tokio::test]
async fn session_under_unknown_key_fails_alone() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let old = keys.generate().unwrap();
    let store = MemoryStore::new();
    seed(&store, "mine", b"ok", &old);
    seed(&store, "foreign", b"??", &EncryptionKey::generate());

    let report = rotate_key(&store, &keys, &enabled(), false).await.unwrap();

    assert_eq!(report.success_count(), 1);
    let failed = report.results.iter().find(|r| !r.success).unwrap();
    assert_eq!(failed.session_id, "foreign");
    assert!(failed.error.as_deref().unwrap().contains("wrong key"));
}

#[tokio::test]
async fn stuck_rotation_can_still_replace_the_key() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let first = keys.generate().unwrap();
    let store = MemoryStore::new();
    seed(&store, "mine", b"ok", &first);
    seed(&store, "foreign", b"??", &EncryptionKey::generate());

    let stuck = rotate_key(&store, &keys, &enabled(), false).await.unwrap();
    let resumed = rotate_key(&store, &keys, &enabled(), false).await.unwrap();
    assert!(resumed.resumed);
    assert_eq!(resumed.new_fingerprint, stuck.new_fingerprint);

    let forced = rotate_key(&store, &keys, &enabled(), true).await.unwrap();

    assert!(!forced.resumed);
    assert_ne!(forced.new_fingerprint, stuck.new_fingerprint);
    assert_eq!(forced.error_count(), 1);
    assert_eq!(forced.retired_keys, 2);
    let newest = keys.require().unwrap();
    assert_eq!(forced.new_fingerprint, newest.fingerprint());
    assert_eq!(read_with(&store, "mine", &newest).unwrap(), b"ok");
    let retired = keys.load_previous().unwrap();
    assert_eq!(retired.len(), 2);
    assert_eq!(retired[0], first);
    assert_eq!(retired[1].fingerprint(), stuck.new_fingerprint);
}

#[tokio::test]
async fn resume_decrypts_with_any_retired_key() {
    let dir = TempDir::new().unwrap();
    let keys = KeyStore::new(dir.path().join("encryption.key"));
    let a = EncryptionKey::generate();
    let b = EncryptionKey::generate();
    let current = keys.generate().unwrap();
    keys.backup(&[a.clone(), b.clone()]).unwrap();
    let store = MemoryStore::new();
    seed(&store, "under-a", b"alpha", &a);
    seed(&store, "under-b", b"beta", &b);
    seed(&store, "done", b"gamma", &current);

    let report = rotate_key(&store, &keys, &enabled(), false).await.unwrap();

    assert!(report.resumed);
    assert!(report.is_complete());
    assert_eq!(report.retired_keys, 0);
    assert_eq!(keys.require().unwrap(), current);
    assert_eq!(read_with(&store, "under-a", &current).unwrap(), b"alpha");
    assert_eq!(read_with(&store, "under-b", &current).unwrap(), b"beta");
    assert_eq!(read_with(&store, "done", &current).unwrap(), b"gamma");
    assert!(keys.load_previous().unwrap().is_empty());
}

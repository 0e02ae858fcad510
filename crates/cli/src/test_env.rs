// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Env var overrides for unit tests.
//!
//! The environment is process-wide, so every test that reads or writes it
//! holds an [`EnvGuard`]. Guards serialize those tests and restore the previous
//! values on drop, even when the test panics.

use parking_lot::{const_mutex, Mutex, MutexGuard};
use std::ffi::{OsStr, OsString};

static ENV_LOCK: Mutex<()> = const_mutex(());

pub(crate) struct EnvGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn lock() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_LOCK.lock(),
        }
    }

    pub(crate) fn set(&mut self, key: &'static str, value: impl AsRef<OsStr>) -> &mut Self {
        self.save(key);
        std::env::set_var(key, value);
        self
    }

    pub(crate) fn remove(&mut self, key: &'static str) -> &mut Self {
        self.save(key);
        std::env::remove_var(key);
        self
    }

    fn save(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, std::env::var_os(key)));
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            match previous {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

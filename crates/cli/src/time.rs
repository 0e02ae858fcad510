// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock behind the device-login poll loop.
//!
//! [`poll_until_token`](crate::api::auth::poll_until_token) only waits through
//! a [`Clock`], so tests run the whole loop with a [`FakeClock`] in no time.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub type Sleep<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;

    fn sleep(&self, duration: Duration) -> Sleep<'_>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    fn sleep(&self, duration: Duration) -> Sleep<'_> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Clock for tests: `sleep` returns at once, moves time forward and is
/// recorded. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeTime>>,
}

#[derive(Debug, Default)]
struct FakeTime {
    now_millis: u64,
    sleeps: Vec<Duration>,
}

impl FakeClock {
    pub fn new(start_millis: u64) -> Self {
        let clock = Self::default();
        clock.inner.lock().now_millis = start_millis;
        clock
    }

    pub fn advance(&self, by: Duration) {
        self.inner.lock().now_millis += by.as_millis() as u64;
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.lock().sleeps.clone()
    }
}

impl Clock for FakeClock {
    fn now_millis(&self) -> u64 {
        self.inner.lock().now_millis
    }

    fn sleep(&self, duration: Duration) -> Sleep<'_> {
        {
            let mut time = self.inner.lock();
            time.now_millis += duration.as_millis() as u64;
            time.sleeps.push(duration);
        }
        Box::pin(std::future::ready(()))
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;

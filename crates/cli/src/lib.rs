// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session sync for AI coding CLIs
//!
//! Hooks installed into Claude Code and Gemini CLI forward lifecycle events to
//! a sync service and upload transcripts, optionally end-to-end encrypted.
//! `sessync resume` restores a synced transcript on another machine so the
//! tool can pick the session up where it left off.
#![doc = include_str!("../README.md")]

pub mod adapter;
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod commands;
pub mod config;
#[doc(hidden)]
pub mod env;
pub mod error;
pub mod event;
#[doc(hidden)]
pub mod fsio;
pub mod hook;
pub mod installer;
pub mod keystore;
#[doc(hidden)]
pub mod logging;
#[doc(hidden)]
pub mod output;
pub mod resume;
pub mod rotation;
#[doc(hidden)]
pub mod time;
pub mod transfer;

#[cfg(test)]
mod test_env;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Build scripts are expected to panic on failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let path = std::path::Path::new(&out_dir).join("env_names.rs");
    let mut f = std::fs::File::create(path).unwrap();

    let vars = [
        ("SESSYNC_CONFIG_DIR", "SESSYNC_CONFIG_DIR"),
        ("SESSYNC_API_URL", "SESSYNC_API_URL"),
        ("SESSYNC_HOOK_TIMEOUT_MS", "SESSYNC_HOOK_TIMEOUT_MS"),
        ("SESSYNC_LOG", "SESSYNC_LOG"),
        ("CLAUDE_CONFIG_DIR", "CLAUDE_CONFIG_DIR"),
        ("GEMINI_CLI_HOME", "GEMINI_CLI_HOME"),
        ("HOME", "HOME"),
        ("USERPROFILE", "USERPROFILE"),
    ];

    for (const_name, env_name) in vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";").unwrap();
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::adapter::SettingsScope;
use crate::event::CliType;

/// Sync AI coding CLI sessions across machines
#[derive(Parser, Debug)]
#[command(name = "sessync", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Handle a hook event from a CLI tool (reads the payload from stdin)
    Hook {
        /// Tool that invoked the hook
        cli: CliType,
    },

    /// Install sync hooks into CLI settings
    Install(HookTarget),

    /// Remove sync hooks from CLI settings
    Uninstall(HookTarget),

    /// Show login, encryption and hook status
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Log in with a device code
    Login,

    /// Forget the stored token
    Logout,

    /// List synced sessions
    Sessions {
        #[arg(long)]
        json: bool,
    },

    /// Restore a synced session into the current project
    Resume {
        /// Remote session id (see `sessync sessions`)
        session_id: String,

        /// Tool to restore for; defaults to the tool that recorded the session
        #[arg(long)]
        cli: Option<CliType>,

        /// Project directory to restore into; defaults to the current directory
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Manage end-to-end encryption
    Encryption {
        #[command(subcommand)]
        action: EncryptionAction,
    },

    /// Re-encrypt every synced transcript with a new key
    RotateKey {
        /// Generate a new key even if an earlier rotation is unfinished
        #[arg(long)]
        new_key: bool,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum EncryptionAction {
    /// Create a key (if needed) and encrypt future uploads
    Enable,
    /// Show whether encryption is on and which key is in use
    Status,
    /// Print the key as base64 for copying to another machine
    Export,
    /// Store a key exported on another machine
    Import {
        /// Base64 key from `sessync encryption export`
        key: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HookTarget {
    /// Tools to configure; defaults to every tool found on this machine
    #[arg(long = "cli", value_enum)]
    pub clis: Vec<CliType>,

    #[arg(long, value_enum, default_value = "user")]
    pub scope: SettingsScope,

    /// Project directory for `--scope project`; defaults to the current directory
    #[arg(long)]
    pub project: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

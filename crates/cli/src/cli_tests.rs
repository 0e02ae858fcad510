// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use clap::CommandFactory;

#[test]
fn test_command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_hook() {
    let cli = Cli::try_parse_from(["sessync", "hook", "gemini"]).unwrap();
    assert!(matches!(cli.command, Command::Hook { cli: CliType::Gemini }));
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_parse_install_defaults() {
    let cli = Cli::try_parse_from(["sessync", "install"]).unwrap();
    let Command::Install(target) = cli.command else {
        panic!("expected install");
    };
    assert!(target.clis.is_empty());
    assert_eq!(target.scope, SettingsScope::User);
    assert_eq!(target.project, None);
}

#[test]
fn test_parse_install_project_scope() {
    let cli = Cli::try_parse_from([
        "sessync", "install", "--cli", "claude", "--cli", "gemini", "--scope", "project",
        "--project", "/work/app",
    ])
    .unwrap();
    let Command::Install(target) = cli.command else {
        panic!("expected install");
    };
    assert_eq!(target.clis, vec![CliType::Claude, CliType::Gemini]);
    assert_eq!(target.scope, SettingsScope::Project);
    assert_eq!(target.project, Some(PathBuf::from("/work/app")));
}

#[test]
fn test_parse_resume() {
    let cli = Cli::try_parse_from(["sessync", "-vv", "resume", "s-1", "--cli", "claude"]).unwrap();
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Command::Resume {
            session_id,
            cli,
            cwd,
        } => {
            assert_eq!(session_id, "s-1");
            assert_eq!(cli, Some(CliType::Claude));
            assert_eq!(cwd, None);
        }
        other => panic!("expected resume, got {other:?}"),
    }
}

#[test]
fn test_parse_encryption_actions() {
    let cli = Cli::try_parse_from(["sessync", "encryption", "import", "AAAA"]).unwrap();
    match cli.command {
        Command::Encryption { action } => {
            assert_eq!(action, EncryptionAction::Import { key: "AAAA".into() })
        }
        other => panic!("expected encryption, got {other:?}"),
    }
}

#[test]
fn test_parse_rotate_key_json() {
    let cli = Cli::try_parse_from(["sessync", "rotate-key", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::RotateKey {
            new_key: false,
            json: true
        }
    ));

    let cli = Cli::try_parse_from(["sessync", "rotate-key", "--new-key"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::RotateKey {
            new_key: true,
            json: false
        }
    ));
}

#[test]
fn test_unknown_cli_is_rejected() {
    assert!(Cli::try_parse_from(["sessync", "hook", "cursor"]).is_err());
}

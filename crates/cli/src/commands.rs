// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command handlers.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;
use sessync_crypto::EncryptionKey;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapter::{self, CliAdapter, SettingsScope};
use crate::api::auth::DeviceAuth;
use crate::api::{self, HttpStore, RemoteStore};
use crate::cli::{Cli, Command, EncryptionAction, HookTarget};
use crate::config::{AppPaths, Config};
use crate::env;
use crate::error::SyncError;
use crate::event::CliType;
use crate::hook::{self, HookRuntime};
use crate::installer;
use crate::keystore::KeyStore;
use crate::output::{human_size, print_json, print_note, print_warning};
use crate::resume;
use crate::rotation;
use crate::time::SystemClock;

/// Timeout for requests made by interactive commands.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved config directory plus the loaded configuration.
#[derive(Debug)]
pub struct App {
    pub paths: AppPaths,
    pub config: Config,
}

impl App {
    pub fn load() -> Result<Self, SyncError> {
        let paths = AppPaths::resolve()?;
        let config = Config::load(&paths.config_path())?;
        Ok(Self { paths, config })
    }

    pub fn keys(&self) -> KeyStore {
        KeyStore::new(self.paths.key_path())
    }

    pub fn save(&mut self) -> Result<(), SyncError> {
        self.config.save(&self.paths.config_path())?;
        Ok(())
    }

    /// HTTP store for the logged-in user.
    pub fn store(&mut self, timeout: Duration) -> Result<HttpStore, SyncError> {
        let token = match &self.config.token {
            Some(token) if self.config.is_logged_in() => token.clone(),
            _ => return Err(SyncError::NotLoggedIn),
        };
        let machine_id = self.config.machine_id();
        Ok(HttpStore::new(self.config.api_url(), token, machine_id, timeout)?)
    }
}

pub async fn run(cli: Cli) -> Result<(), SyncError> {
    match cli.command {
        Command::Hook { cli } => run_hook(cli).await,
        Command::Install(target) => install(&target),
        Command::Uninstall(target) => uninstall(&target),
        Command::Status { json } => status(json),
        Command::Login => login().await,
        Command::Logout => logout(),
        Command::Sessions { json } => sessions(json).await,
        Command::Resume {
            session_id,
            cli,
            cwd,
        } => resume(&session_id, cli, cwd).await,
        Command::Encryption { action } => encryption(action),
        Command::RotateKey { new_key, json } => rotate_key(new_key, json).await,
    }
}

async fn run_hook(cli_type: CliType) -> Result<(), SyncError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| SyncError::io("<stdin>", e))?;

    // A broken config must not break the host CLI; sync is skipped instead.
    let (key_path, mut config) = match App::load() {
        Ok(app) => (app.paths.key_path(), app.config),
        Err(e) => {
            tracing::warn!(error = %e, "config unavailable; hook runs logged out");
            (PathBuf::new(), Config::default())
        }
    };
    let timeout = env::hook_timeout_ms()
        .map(Duration::from_millis)
        .unwrap_or(hook::DEFAULT_HOOK_TIMEOUT);
    let machine_id = config.machine_id();

    let store = match config.token.clone() {
        Some(token) if config.is_logged_in() => {
            match HttpStore::new(config.api_url(), token, machine_id.clone(), timeout) {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to build HTTP client");
                    None
                }
            }
        }
        _ => None,
    };

    let adapter = adapter::adapter_for(cli_type)?;
    let keys = KeyStore::new(key_path);
    let runtime = HookRuntime {
        store: store.as_ref().map(|s| s as &dyn RemoteStore),
        machine_id,
        encryption_enabled: config.encryption_enabled,
        keys: &keys,
        timeout,
    };

    let outcome = hook::run_hook(adapter.as_ref(), &input, &runtime).await?;
    tracing::info!(
        event = %outcome.context.event_type,
        session = %outcome.context.session_id,
        sent = outcome.event_sent,
        uploaded = outcome.transcript_uploaded,
        warnings = outcome.warnings.len(),
        "hook done"
    );
    Ok(())
}

/// Adapters named by `--cli`, or every tool present on this machine.
fn target_adapters(target: &HookTarget) -> Result<Vec<Box<dyn CliAdapter>>, SyncError> {
    if !target.clis.is_empty() {
        return target
            .clis
            .iter()
            .map(|cli| adapter::adapter_for(*cli).map_err(SyncError::from))
            .collect();
    }
    let found: Vec<_> = adapter::all_adapters()?
        .into_iter()
        .filter(|a| a.is_installed())
        .collect();
    if found.is_empty() {
        print_warning("no supported CLI found; pass --cli to configure one anyway");
    }
    Ok(found)
}

fn project_dir(target: &HookTarget) -> Result<Option<PathBuf>, SyncError> {
    match (target.scope, &target.project) {
        (SettingsScope::User, _) => Ok(None),
        (SettingsScope::Project, Some(path)) => resolve_dir(path).map(Some),
        (SettingsScope::Project, None) => current_dir().map(Some),
    }
}

fn current_dir() -> Result<PathBuf, SyncError> {
    std::env::current_dir().map_err(|e| SyncError::io(".", e))
}

/// Absolute form of a user-supplied directory, as the tools see their cwd.
fn resolve_dir(path: &Path) -> Result<PathBuf, SyncError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            std::path::absolute(path).map_err(|e| SyncError::io(path, e))
        }
        Err(e) => Err(SyncError::io(path, e)),
    }
}

fn install(target: &HookTarget) -> Result<(), SyncError> {
    let project = project_dir(target)?;
    for adapter in target_adapters(target)? {
        let report = installer::install_hooks(adapter.as_ref(), target.scope, project.as_deref())?;
        if report.changed() {
            println!(
                "{}: added {} hook(s) to {}",
                adapter.display_name(),
                report.added.len(),
                report.settings_path.display()
            );
        } else {
            println!(
                "{}: hooks already installed in {}",
                adapter.display_name(),
                report.settings_path.display()
            );
        }
        if report.experimental {
            print_note(format_args!(
                "{} hooks are experimental; restart it to pick up the new settings",
                adapter.display_name()
            ));
        }
    }
    Ok(())
}

fn uninstall(target: &HookTarget) -> Result<(), SyncError> {
    let project = project_dir(target)?;
    for adapter in target_adapters(target)? {
        let removed =
            installer::uninstall_hooks(adapter.as_ref(), target.scope, project.as_deref())?;
        println!("{}: removed {} hook(s)", adapter.display_name(), removed);
    }
    Ok(())
}

#[derive(Serialize)]
struct ToolStatus {
    cli: CliType,
    name: &'static str,
    installed: bool,
    hooks_installed: bool,
    settings_path: PathBuf,
}

#[derive(Serialize)]
struct StatusReport {
    config_dir: PathBuf,
    api_url: String,
    logged_in: bool,
    machine_id: Option<String>,
    encryption_enabled: bool,
    key_fingerprint: Option<String>,
    tools: Vec<ToolStatus>,
}

fn status(json: bool) -> Result<(), SyncError> {
    let app = App::load()?;
    let keys = app.keys();
    let mut tools = Vec::new();
    for adapter in adapter::all_adapters()? {
        tools.push(ToolStatus {
            cli: adapter.cli_type(),
            name: adapter.display_name(),
            installed: adapter.is_installed(),
            hooks_installed: installer::hooks_installed(
                adapter.as_ref(),
                SettingsScope::User,
                None,
            ),
            settings_path: adapter.settings_path(SettingsScope::User, None)?,
        });
    }
    let report = StatusReport {
        config_dir: app.paths.root().to_path_buf(),
        api_url: app.config.api_url(),
        logged_in: app.config.is_logged_in(),
        machine_id: app.config.machine_id.clone(),
        encryption_enabled: app.config.encryption_enabled,
        key_fingerprint: keys.load()?.map(|k| k.fingerprint()),
        tools,
    };

    if json {
        emit_json(&report)?;
        return Ok(());
    }
    println!("Config:     {}", report.config_dir.display());
    println!("Server:     {}", report.api_url);
    println!("Logged in:  {}", yes_no(report.logged_in));
    println!(
        "Encryption: {}",
        match (report.encryption_enabled, report.key_fingerprint.as_deref()) {
            (true, Some(fp)) => format!("on (key {fp})"),
            (true, None) => "on, but no key on this machine".to_string(),
            (false, _) => "off".to_string(),
        }
    );
    for tool in &report.tools {
        println!(
            "{:<12}{}, hooks {}",
            format!("{}:", tool.name),
            if tool.installed { "found" } else { "not found" },
            if tool.hooks_installed { "installed" } else { "not installed" }
        );
    }
    Ok(())
}

fn emit_json<T: Serialize>(value: &T) -> Result<(), SyncError> {
    print_json(value).map_err(|e| SyncError::io("<stdout>", e.into()))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

async fn login() -> Result<(), SyncError> {
    let mut app = App::load()?;
    let auth = DeviceAuth::new(app.config.api_url(), REQUEST_TIMEOUT)?;
    let code = auth.request_device_code().await?;

    let url = code
        .verification_uri_complete
        .as_deref()
        .unwrap_or(&code.verification_uri);
    println!("Open {url} and enter code {}", code.user_code);

    let token = auth.poll_for_token(&code, &SystemClock).await?;
    app.config.token = Some(token);
    app.save()?;
    println!("Logged in.");
    Ok(())
}

fn logout() -> Result<(), SyncError> {
    let mut app = App::load()?;
    app.config.token = None;
    app.save()?;
    println!("Logged out.");
    Ok(())
}

async fn sessions(json: bool) -> Result<(), SyncError> {
    let mut app = App::load()?;
    let store = app.store(REQUEST_TIMEOUT)?;
    let sessions = api::list_all_sessions(&store).await?;

    if json {
        return emit_json(&sessions);
    }
    if sessions.is_empty() {
        println!("No synced sessions.");
        return Ok(());
    }
    for s in &sessions {
        let flags = match (s.is_encrypted, s.has_transcript) {
            (_, false) => "no transcript",
            (true, true) => "encrypted",
            (false, true) => "plain",
        };
        println!(
            "{}  {}  [{}]  {}",
            s.id,
            s.title.as_deref().unwrap_or(&s.local_session_id),
            flags,
            s.project_path.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn resume(
    session_id: &str,
    cli: Option<CliType>,
    cwd: Option<PathBuf>,
) -> Result<(), SyncError> {
    let mut app = App::load()?;
    let store = app.store(REQUEST_TIMEOUT)?;
    let cwd = match cwd {
        Some(dir) => resolve_dir(&dir)?,
        None => current_dir()?,
    };

    let record = resume::fetch_record(&store, session_id).await?;
    let cli_type = cli.or(record.cli_type).unwrap_or(CliType::Claude);
    let adapter = adapter::adapter_for(cli_type)?;

    let outcome = resume::restore_transcript(&record, adapter.as_ref(), &cwd, &app.keys())?;
    if let Some(warning) = &outcome.warning {
        print_warning(warning);
    }
    println!(
        "Restored {} to {}",
        human_size(outcome.bytes as u64),
        outcome.path.display()
    );
    println!(
        "Resume with: {}",
        adapter.resume_command(&record.local_session_id, Some(cwd.as_path()))
    );
    Ok(())
}

fn encryption(action: EncryptionAction) -> Result<(), SyncError> {
    let mut app = App::load()?;
    let keys = app.keys();
    match action {
        EncryptionAction::Enable => {
            let key = match keys.load()? {
                Some(key) => key,
                None => keys.generate()?,
            };
            app.config.encryption_enabled = true;
            app.save()?;
            println!("Encryption enabled (key {}).", key.fingerprint());
            print_note(format_args!(
                "copy this key to your other machines with `sessync encryption export`; \
                 without it synced transcripts cannot be restored"
            ));
        }
        EncryptionAction::Status => {
            let state = if app.config.encryption_enabled {
                "on"
            } else {
                "off"
            };
            println!("Encryption: {state}");
            match keys.load()? {
                Some(key) => {
                    println!("Key:        {} ({})", key.fingerprint(), keys.path().display())
                }
                None => println!("Key:        none"),
            }
            let retired = keys.load_previous()?;
            if !retired.is_empty() {
                println!(
                    "Retired:    {} key(s) pending rotation ({})",
                    retired.len(),
                    keys.backup_path().display()
                );
            }
        }
        EncryptionAction::Export => {
            let key = keys.require()?;
            println!("{}", BASE64.encode(key.as_bytes()));
        }
        EncryptionAction::Import { key } => {
            let key = import_key(&key)?;
            if let Some(existing) = keys.load()? {
                if existing != key {
                    // Appends, so keys from an unfinished rotation survive.
                    keys.retire(&existing)?;
                    print_warning(format_args!(
                        "replaced key {}; the old key was saved to {}",
                        existing.fingerprint(),
                        keys.backup_path().display()
                    ));
                }
            }
            keys.save(&key)?;
            app.config.encryption_enabled = true;
            app.save()?;
            println!("Imported key {}.", key.fingerprint());
        }
    }
    Ok(())
}

fn import_key(encoded: &str) -> Result<EncryptionKey, SyncError> {
    let bytes = zeroize::Zeroizing::new(
        BASE64
            .decode(encoded.trim())
            .map_err(|e| SyncError::InvalidPayload(format!("key is not valid base64: {e}")))?,
    );
    Ok(EncryptionKey::from_bytes(&bytes)?)
}

async fn rotate_key(new_key: bool, json: bool) -> Result<(), SyncError> {
    let mut app = App::load()?;
    let store = app.store(REQUEST_TIMEOUT)?;
    let keys = app.keys();
    let report = rotation::rotate_key(&store, &keys, &app.config, new_key).await?;

    if json {
        return emit_json(&report);
    }
    if report.resumed {
        println!("Resumed an interrupted rotation.");
    }
    println!(
        "New key {}: {} session(s) re-encrypted, {} failed.",
        report.new_fingerprint,
        report.success_count(),
        report.error_count()
    );
    for failed in report.results.iter().filter(|r| !r.success) {
        print_warning(format_args!(
            "{}: {}",
            failed.session_id,
            failed.error.as_deref().unwrap_or("unknown error")
        ));
    }
    if !report.is_complete() {
        print_note(format_args!(
            "{} old key(s) kept in {}; run `sessync rotate-key` again to retry the failed \
             sessions, or `sessync rotate-key --new-key` to replace the key anyway",
            report.retired_keys,
            keys.backup_path().display()
        ));
    }
    Ok(())
}

/// Log destination for `command`: hooks write to the hook log.
pub fn log_target(command: &Command) -> crate::logging::LogTarget {
    use crate::logging::LogTarget;
    match command {
        Command::Hook { .. } => match AppPaths::resolve() {
            Ok(paths) => LogTarget::File(paths.hook_log_path()),
            Err(_) => LogTarget::Stderr,
        },
        _ => LogTarget::Stderr,
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command implementations for the `parley` binary
//!
//! Merges CLI overrides with settings, opens the session and runs the
//! requested command.

use std::path::Path;

use crate::chat::run_chat;
use crate::cli::{AskArgs, ChatArgs, RemoteArgs, ShowArgs};
use crate::config::Settings;
use crate::error::{ParleyError, Result};
use crate::log::{LogRecord, LogStore};
use crate::query::{HttpTransport, Transport};
use crate::session::{Session, SessionConfig};
use crate::terminal::Console;

/// Apply CLI overrides on top of loaded settings.
pub fn apply_overrides(mut settings: Settings, remote: &RemoteArgs) -> Settings {
    if let Some(endpoint) = &remote.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(token) = &remote.token {
        settings.api_token = Some(token.clone());
    }
    if let Some(timeout) = remote.timeout {
        settings.timeout_secs = timeout;
    }
    settings
}

/// Token from `--token`, the environment or settings, in that order.
fn token(settings: &Settings, remote: &RemoteArgs) -> Option<String> {
    remote.token.clone().or_else(|| settings.resolve_token())
}

fn require_token(settings: &Settings, remote: &RemoteArgs) -> Result<String> {
    token(settings, remote).ok_or_else(|| {
        ParleyError::Config(format!(
            "no API token found; set {} or pass --token",
            settings.token_env
        ))
    })
}

/// Open the session described by `args`.
pub fn open_session(args: &ChatArgs, settings: &Settings) -> Result<Session> {
    if let Some(path) = &args.load {
        return Session::new(SessionConfig::load(path, token(settings, &args.remote)));
    }

    let credential = require_token(settings, &args.remote)?;
    let endpoint = settings.endpoint.clone();
    let store = LogStore::new(args.log_dir.as_ref().unwrap_or(&settings.log_dir));

    match &args.name {
        Some(name) if args.unsafe_log => {
            let mut session = Session::new(SessionConfig::basic(credential, endpoint))?;
            session.create_unsafe_log(&store, name)?;
            Ok(session)
        }
        Some(name) => Session::new(
            SessionConfig::with_log(credential, endpoint, name.clone()).in_store(store),
        ),
        None => Session::new(SessionConfig::basic(credential, endpoint)),
    }
}

/// `parley chat`
pub async fn run_chat_command(
    args: &ChatArgs,
    settings: Settings,
    console: &mut dyn Console,
) -> Result<()> {
    let settings = apply_overrides(settings, &args.remote);
    let mut session = open_session(args, &settings)?;
    let transport = HttpTransport::with_timeout(settings.timeout())?;

    if let Some(path) = session.log_path() {
        console.print(&format!("Logging to {}\n", path.display()))?;
    }
    for turn in session.turns() {
        console.print(&format!("User : {}\n", turn.user))?;
        console.print(&format!("Bot : {}\n", turn.bot))?;
    }

    let completed = run_chat(&mut session, &transport, console).await?;
    tracing::debug!(completed, "chat ended");
    Ok(())
}

/// `parley ask`
pub async fn run_ask(args: &AskArgs, settings: Settings, console: &mut dyn Console) -> Result<()> {
    let settings = apply_overrides(settings, &args.remote);
    let transport = HttpTransport::with_timeout(settings.timeout())?;
    ask_with(args, &settings, &transport, console).await
}

async fn ask_with(
    args: &AskArgs,
    settings: &Settings,
    transport: &dyn Transport,
    console: &mut dyn Console,
) -> Result<()> {
    let credential = require_token(settings, &args.remote)?;
    let mut session = Session::new(SessionConfig::basic(credential, settings.endpoint.clone()))?;
    let reply = session.exchange(transport, Some(args.text.as_str())).await?;
    console.print(&format!("Bot : {}\n", reply))
}

/// `parley show`
pub fn run_show(args: &ShowArgs, console: &mut dyn Console) -> Result<()> {
    let record = LogStore::load(&args.path)?;
    console.print(&render_transcript(&args.path, &record))
}

/// Human-readable transcript of a log. Never prints the token.
pub fn render_transcript(path: &Path, record: &LogRecord) -> String {
    let mut out = format!(
        "{} ({}, {} turns)\nModel : {}\n",
        path.display(),
        if record.safe { "safe" } else { "unsafe" },
        record.instances.len(),
        record.model
    );
    for instance in &record.instances {
        out.push_str(&format!("User : {}\nBot : {}\n", instance.user, instance.bot));
    }
    out
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session state, the pending-turn protocol and the query exchange

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ParleyError, Result};
use crate::log::{LogRecord, LogStore};
use crate::query::{QueryRequest, Transport};

use super::options::SessionConfig;
use super::turn::{Turn, TurnState, UNSET};

/// Endpoint plus the bearer credential used against it
#[derive(Clone)]
struct Remote {
    endpoint: String,
    credential: String,
}

impl fmt::Debug for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Remote")
            .field("endpoint", &self.endpoint)
            .field("credential", &"<hidden>")
            .finish()
    }
}

/// The log a session snapshots itself into
#[derive(Debug, Clone)]
struct LogHandle {
    path: PathBuf,
    safe: bool,
    /// Last record written to `path`
    record: LogRecord,
}

/// A multi-turn conversation with one remote endpoint
#[derive(Debug, Default)]
pub struct Session {
    /// Completed turns in dialogue order
    turns: Vec<Turn>,
    state: TurnState,
    remote: Option<Remote>,
    log: Option<LogHandle>,
}

impl Session {
    /// Build a session from one of the supported configurations.
    pub fn new(config: SessionConfig) -> Result<Self> {
        match config {
            SessionConfig::Empty => Ok(Self::empty()),
            SessionConfig::Basic {
                credential,
                endpoint,
            } => Self::basic(credential, endpoint),
            SessionConfig::BasicWithLog {
                credential,
                endpoint,
                name,
                store,
            } => {
                let mut session = Self::basic(credential, endpoint)?;
                session.create_log(&store, &name)?;
                Ok(session)
            }
            SessionConfig::Loaded { path, credential } => Self::load(&path, credential),
        }
    }

    /// A session with no endpoint, credential or log
    pub fn empty() -> Self {
        Self::default()
    }

    fn basic(credential: String, endpoint: String) -> Result<Self> {
        let mut session = Self::empty();
        session.configure(endpoint, credential)?;
        Ok(session)
    }

    /// Restore a session from the log at `path`.
    ///
    /// Safe logs do not carry the credential, so one must be supplied.
    pub fn load(path: &Path, credential: Option<String>) -> Result<Self> {
        let record = LogStore::load(path)?;
        Self::from_record(record, path, credential)
    }

    fn from_record(record: LogRecord, path: &Path, credential: Option<String>) -> Result<Self> {
        let credential = if record.safe {
            match credential {
                Some(token) if !token.is_empty() => token,
                _ => {
                    return Err(ParleyError::Config(format!(
                        "log {} is in safe mode; an API token is required to resume it",
                        path.display()
                    )))
                }
            }
        } else {
            record.token.clone()
        };

        let remote = (record.model != UNSET).then(|| Remote {
            endpoint: record.model.clone(),
            credential,
        });

        tracing::debug!(
            path = %path.display(),
            turns = record.instances.len(),
            safe = record.safe,
            "loaded session from log"
        );

        Ok(Self {
            turns: record.turns(),
            state: TurnState::Idle,
            remote,
            log: Some(LogHandle {
                path: path.to_path_buf(),
                safe: record.safe,
                record,
            }),
        })
    }

    /// Set the endpoint and credential, e.g. on a session that started empty.
    pub fn configure(
        &mut self,
        endpoint: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<()> {
        let endpoint = endpoint.into();
        let credential = credential.into();
        if endpoint.is_empty() {
            return Err(ParleyError::Config("an endpoint URL is required".to_string()));
        }
        if credential.is_empty() {
            return Err(ParleyError::Config("an API token is required".to_string()));
        }
        self.remote = Some(Remote {
            endpoint,
            credential,
        });
        Ok(())
    }

    /// Endpoint URL, or `"None"` when unconfigured
    pub fn endpoint(&self) -> &str {
        self.remote.as_ref().map_or(UNSET, |r| r.endpoint.as_str())
    }

    pub fn is_configured(&self) -> bool {
        self.remote.is_some()
    }

    /// Completed turns, excluding any draft
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns including a pending draft
    pub fn len(&self) -> usize {
        self.turns.len() + usize::from(self.state.is_pending())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn pending_user_turn(&self) -> Option<&str> {
        self.state.pending_user()
    }

    /// User utterances in turn order, draft included
    pub fn user_turns(&self) -> Vec<String> {
        let mut users: Vec<String> = self.turns.iter().map(|t| t.user.clone()).collect();
        if let Some(draft) = self.state.pending_user() {
            users.push(draft.to_string());
        }
        users
    }

    /// Bot utterances aligned with `user_turns`; a draft's slot reads `"None"`
    pub fn bot_turns(&self) -> Vec<String> {
        let mut bots: Vec<String> = self.turns.iter().map(|t| t.bot.clone()).collect();
        if self.state.is_pending() {
            bots.push(UNSET.to_string());
        }
        bots
    }

    /// Start a draft turn, or revise the current draft in place.
    pub fn set_user_turn(&mut self, text: impl Into<String>) {
        let text = text.into();
        match &mut self.state {
            TurnState::PendingEdit { user } => *user = text,
            TurnState::Idle => {
                tracing::debug!(turn = self.turns.len(), "started draft turn");
                self.state = TurnState::PendingEdit { user: text };
            }
        }
    }

    /// Drop the draft turn without exchanging it.
    pub fn discard_pending(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            TurnState::PendingEdit { user } => Some(user),
            TurnState::Idle => None,
        }
    }

    /// The utterance the next exchange will answer.
    ///
    /// A pending draft wins over `text`; without a draft `text` is required.
    pub fn resolve_user_turn(&self, text: Option<&str>) -> Result<String> {
        match &self.state {
            TurnState::PendingEdit { user } => {
                if let Some(explicit) = text.filter(|t| *t != user.as_str()) {
                    tracing::warn!(
                        ignored = explicit,
                        "a draft turn is pending; using the draft instead of the given text"
                    );
                }
                Ok(user.clone())
            }
            TurnState::Idle => text.map(str::to_string).ok_or_else(|| {
                ParleyError::Usage(
                    "no draft turn is pending, so the exchange needs user text".to_string(),
                )
            }),
        }
    }

    /// Request body for answering `user` after the completed turns.
    pub fn build_query(&self, user: &str) -> QueryRequest {
        let mut past_user_inputs: Vec<String> = self.turns.iter().map(|t| t.user.clone()).collect();
        past_user_inputs.push(user.to_string());

        QueryRequest {
            past_user_inputs,
            generated_responses: self.turns.iter().map(|t| t.bot.clone()).collect(),
            text: user.to_string(),
        }
    }

    /// Run one exchange with the endpoint and record the reply.
    ///
    /// The session is only modified once a reply has been decoded, so a
    /// failed exchange leaves the history (and any draft) untouched.
    pub async fn exchange(
        &mut self,
        transport: &dyn Transport,
        text: Option<&str>,
    ) -> Result<String> {
        let user = self.resolve_user_turn(text)?;
        let remote = self.remote.as_ref().ok_or_else(|| {
            ParleyError::Config("no endpoint is configured for this session".to_string())
        })?;

        let request = self.build_query(&user);
        let response = transport
            .send(&remote.endpoint, &remote.credential, &request)
            .await?;

        let reply = response.generated_text;
        self.turns.push(Turn::new(user, reply.clone()));
        self.state = TurnState::Idle;
        tracing::debug!(turns = self.turns.len(), "exchange completed");

        Ok(reply)
    }

    /// Snapshot the completed turns into a fresh record.
    ///
    /// A pending draft has no reply yet and is left out.
    pub fn build_record(&self, safe: bool) -> LogRecord {
        let credential = self.remote.as_ref().map_or(UNSET, |r| r.credential.as_str());
        LogRecord::build(self.endpoint(), credential, &self.turns, safe)
    }

    /// Create a safe (token redacted) log named `name` and attach it.
    pub fn create_log(&mut self, store: &LogStore, name: &str) -> Result<&Path> {
        self.create_log_with(store, name, true)
    }

    /// Create a log that stores the credential in the clear and attach it.
    pub fn create_unsafe_log(&mut self, store: &LogStore, name: &str) -> Result<&Path> {
        self.create_log_with(store, name, false)
    }

    fn create_log_with(&mut self, store: &LogStore, name: &str, safe: bool) -> Result<&Path> {
        let record = self.build_record(safe);
        let path = store.create(name, &record)?;
        let handle = self.log.insert(LogHandle { path, safe, record });
        Ok(handle.path.as_path())
    }

    /// Rewrite the attached log from the current history.
    pub fn save_log(&mut self) -> Result<()> {
        let Some(handle) = self.log.as_ref() else {
            return Err(ParleyError::Usage(
                "this session has no log; create one before saving".to_string(),
            ));
        };

        if self.state.is_pending() {
            tracing::debug!("saving log without the pending draft turn");
        }

        let record = self.build_record(handle.safe);
        LogStore::save(&handle.path, &record)?;
        if let Some(handle) = self.log.as_mut() {
            handle.record = record;
        }
        Ok(())
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(|h| h.path.as_path())
    }

    /// Whether the attached log redacts the credential
    pub fn log_is_safe(&self) -> Option<bool> {
        self.log.as_ref().map(|h| h.safe)
    }

    /// The record most recently written to the attached log
    pub fn last_record(&self) -> Option<&LogRecord> {
        self.log.as_ref().map(|h| &h.record)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Parley - multi-turn conversations with a hosted text-generation endpoint.
//!
//! This crate exposes the runtime used by the `parley` CLI (`src/main.rs`):
//! - `session`: dialogue history, the pending-turn protocol and the query exchange
//! - `log`: log records, credential redaction and log file persistence
//! - `query`: wire schema and the transport seam (reqwest-backed or mocked)
//! - `chat`, `terminal`, `commands`, `cli`: the interactive front end
//! - `config`: user settings

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod log;
pub mod query;
pub mod session;
pub mod terminal;

pub use error::{ParleyError, Result};
pub use session::{Session, SessionConfig};

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Conversation sessions
//!
//! A session owns the dialogue history, the pending-turn state and the
//! credentials for one remote endpoint, and optionally a log file it
//! snapshots itself into.

pub mod conversation;
pub mod options;
pub mod turn;

pub use conversation::Session;
pub use options::SessionConfig;
pub use turn::{Turn, TurnState, UNSET};

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Turns and the pending-turn state

/// Placeholder for an unset endpoint, credential or bot reply
pub const UNSET: &str = "None";

/// One completed (user, bot) exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user: String,
    pub bot: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }
}

/// Whether the last turn is a draft awaiting its reply
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Every turn has a reply
    #[default]
    Idle,
    /// A draft user utterance that the next exchange will answer
    PendingEdit { user: String },
}

impl TurnState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TurnState::PendingEdit { .. })
    }

    /// The draft user utterance, if any
    pub fn pending_user(&self) -> Option<&str> {
        match self {
            TurnState::Idle => None,
            TurnState::PendingEdit { user } => Some(user),
        }
    }
}

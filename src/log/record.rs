// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! On-disk log schema

use serde::{Deserialize, Serialize};

use crate::session::Turn;

/// File name suffix appended to a log name
pub const LOG_SUFFIX: &str = ".chat.json";

/// One completed exchange as stored in a log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInstance {
    pub user: String,
    pub bot: String,
}

impl From<&Turn> for LogInstance {
    fn from(turn: &Turn) -> Self {
        Self {
            user: turn.user.clone(),
            bot: turn.bot.clone(),
        }
    }
}

impl From<LogInstance> for Turn {
    fn from(instance: LogInstance) -> Self {
        Turn::new(instance.user, instance.bot)
    }
}

/// Serializable snapshot of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Whether `token` holds the redaction marker instead of the credential
    pub safe: bool,
    /// Endpoint URL of the model
    pub model: String,
    pub token: String,
    /// Turns in dialogue order
    #[serde(default)]
    pub instances: Vec<LogInstance>,
}

impl LogRecord {
    /// Parse a record from JSON text.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Render the record as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Turns in record order.
    pub fn turns(&self) -> Vec<Turn> {
        self.instances.iter().cloned().map(Turn::from).collect()
    }
}

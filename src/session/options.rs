// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session configurations

use std::path::PathBuf;

use crate::log::LogStore;

/// How a session is initialised
#[derive(Debug, Clone, Default)]
pub enum SessionConfig {
    /// No endpoint or credential yet; configure later
    #[default]
    Empty,
    /// Endpoint and credential, no log
    Basic { credential: String, endpoint: String },
    /// Endpoint and credential plus a new safe log named `name` in `store`
    BasicWithLog {
        credential: String,
        endpoint: String,
        name: String,
        store: LogStore,
    },
    /// Restore from an existing log; `credential` is required for safe logs
    Loaded {
        path: PathBuf,
        credential: Option<String>,
    },
}

impl SessionConfig {
    pub fn basic(credential: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Basic {
            credential: credential.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Basic configuration that also creates `<name>.chat.json` in the current directory.
    pub fn with_log(
        credential: impl Into<String>,
        endpoint: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::BasicWithLog {
            credential: credential.into(),
            endpoint: endpoint.into(),
            name: name.into(),
            store: LogStore::default(),
        }
    }

    pub fn load(path: impl Into<PathBuf>, credential: Option<String>) -> Self {
        Self::Loaded {
            path: path.into(),
            credential,
        }
    }

    /// Place the log of a `BasicWithLog` configuration in `store` instead.
    pub fn in_store(self, store: LogStore) -> Self {
        match self {
            Self::BasicWithLog {
                credential,
                endpoint,
                name,
                ..
            } => Self::BasicWithLog {
                credential,
                endpoint,
                name,
                store,
            },
            other => other,
        }
    }
}

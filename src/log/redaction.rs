// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Credential redaction for saved logs

use crate::session::Turn;

use super::record::{LogInstance, LogRecord};

/// Marker written in place of the credential in safe logs
pub const REDACTED_TOKEN: &str = "Token is hidden due to safety";

/// The token value to persist for the given mode.
pub fn redact_token(credential: &str, safe: bool) -> String {
    if safe {
        REDACTED_TOKEN.to_string()
    } else {
        credential.to_string()
    }
}

impl LogRecord {
    /// Snapshot a model, credential and completed turns into a fresh record.
    pub fn build(model: &str, credential: &str, turns: &[Turn], safe: bool) -> Self {
        Self {
            safe,
            model: model.to_string(),
            token: redact_token(credential, safe),
            instances: turns.iter().map(LogInstance::from).collect(),
        }
    }

    /// True when the stored token is the redaction marker.
    pub fn is_redacted(&self) -> bool {
        self.token == REDACTED_TOKEN
    }
}

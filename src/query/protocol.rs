// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Request and response bodies for the conversational endpoint

use serde::{Deserialize, Serialize};

/// Body of the POST request sent for each exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Every user utterance so far, including the one being answered
    pub past_user_inputs: Vec<String>,
    /// Bot replies for the completed turns only
    pub generated_responses: Vec<String>,
    /// The utterance being answered
    pub text: String,
}

/// Response body. Only `generated_text` is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub generated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<serde_json::Value>,
}

impl QueryResponse {
    /// A response carrying just the generated text
    pub fn text(generated_text: impl Into<String>) -> Self {
        Self {
            generated_text: generated_text.into(),
            ..Default::default()
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for Parley
//!
//! Handles loading and saving settings from ~/.parley/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod io;

/// Main settings structure, stored in ~/.parley/settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Conversational model endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Environment variable name for the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Seconds to wait for one exchange
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory where new logs are created
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: None,
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill".to_string()
}

fn default_token_env() -> String {
    "HF_API_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Settings {
    /// Get the API token, checking the env var first.
    pub fn resolve_token(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.api_token.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.endpoint.contains("blenderbot"));
        assert_eq!(settings.token_env, "HF_API_TOKEN");
        assert_eq!(settings.timeout(), Duration::from_secs(60));
        assert_eq!(settings.log_dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.token_env, "HF_API_TOKEN");
    }

    #[test]
    fn test_resolve_token_prefers_env() {
        let settings = Settings {
            token_env: "PARLEY_TEST_TOKEN_PREFERS_ENV".to_string(),
            api_token: Some("from_file".to_string()),
            ..Default::default()
        };
        std::env::set_var("PARLEY_TEST_TOKEN_PREFERS_ENV", "from_env");
        assert_eq!(settings.resolve_token(), Some("from_env".to_string()));
        std::env::remove_var("PARLEY_TEST_TOKEN_PREFERS_ENV");
        assert_eq!(settings.resolve_token(), Some("from_file".to_string()));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = Settings {
            endpoint: "https://example.test/chat".to_string(),
            timeout_secs: 10,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, "https://example.test/chat");
        assert_eq!(loaded.timeout_secs, 10);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Settings::load_from(&temp_dir.path().join("none.json")).unwrap();
        assert_eq!(loaded.timeout_secs, 60);
    }
}

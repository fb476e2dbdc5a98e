// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for Parley
//!
//! Configuration, usage, transport and persistence failures are kept as
//! distinct variants so callers can tell "no request was sent" apart from
//! "the request was sent and failed".

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Parley operations
#[derive(Error, Debug)]
pub enum ParleyError {
    /// A session configuration is missing a required field
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was invoked in a state that does not allow it
    #[error("Usage error: {0}")]
    Usage(String),

    /// The remote exchange failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A create-only log write found an existing file
    #[error("Log already exists: {}", .0.display())]
    LogExists(PathBuf),

    /// A log path could not be read or written
    #[error("Log file error at {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log file did not match the log schema
    #[error("Malformed log at {}: {source}", .path.display())]
    LogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport and protocol errors from a single exchange
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,

    /// Endpoint returned a non-success status
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ParleyError {
    /// True when the failure happened before any request was sent.
    pub fn is_local(&self) -> bool {
        !matches!(self, ParleyError::Api(_))
    }
}

/// Result type alias for Parley operations
pub type Result<T> = std::result::Result<T, ParleyError>;

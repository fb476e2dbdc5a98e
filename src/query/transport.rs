// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! HTTP transport for the conversational endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ApiError, ParleyError, Result};

use super::protocol::{QueryRequest, QueryResponse};

/// Default time allowed for one exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Performs exactly one request/response exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `request` to `endpoint` with a bearer credential and decode the reply.
    async fn send(
        &self,
        endpoint: &str,
        credential: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        credential: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse> {
        tracing::debug!(
            endpoint,
            turns = request.past_user_inputs.len(),
            "sending query"
        );

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", credential))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "query rejected by endpoint");
            return Err(ParleyError::Api(ApiError::ServerError {
                status: status.as_u16(),
                message: body,
            }));
        }

        let decoded: QueryResponse = serde_json::from_str(&body)
            .map_err(|e| ParleyError::Api(ApiError::InvalidResponse(e.to_string())))?;
        if !decoded.warnings.is_empty() {
            tracing::debug!(warnings = ?decoded.warnings, "endpoint returned warnings");
        }
        Ok(decoded)
    }
}

fn request_error(err: reqwest::Error) -> ParleyError {
    if err.is_timeout() {
        ParleyError::Api(ApiError::Timeout)
    } else {
        ParleyError::Api(ApiError::Network(err.to_string()))
    }
}

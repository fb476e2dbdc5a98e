// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock transport for testing
//!
//! Replays queued replies without touching the network and records every
//! request it was asked to send.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{ApiError, ParleyError, Result};

use super::protocol::{QueryRequest, QueryResponse};
use super::transport::Transport;

/// A pre-configured outcome for the mock transport
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with this generated text
    Text(String),
    /// Fail as if the network were unreachable
    NetworkError(String),
    /// Fail with a non-success status
    Status(u16, String),
}

/// A request captured by the mock transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub credential: String,
    pub body: QueryRequest,
}

/// A mock transport for testing
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    call_count: Arc<AtomicUsize>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create a mock with no queued replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Text(text.into()));
        self
    }

    /// Queue a network failure
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.push(MockReply::NetworkError(message.into()));
        self
    }

    /// Queue an arbitrary reply
    pub fn push(&self, reply: MockReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Number of times `send` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.recorded).clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.recorded).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock transport lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        endpoint: &str,
        credential: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.recorded).push(RecordedRequest {
            endpoint: endpoint.to_string(),
            credential: credential.to_string(),
            body: request.clone(),
        });

        // An exhausted queue behaves like an endpoint that answers with no text.
        let reply = lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(String::new()));

        match reply {
            MockReply::Text(text) => Ok(QueryResponse::text(text)),
            MockReply::NetworkError(message) => Err(ParleyError::Api(ApiError::Network(message))),
            MockReply::Status(status, message) => {
                Err(ParleyError::Api(ApiError::ServerError { status, message }))
            }
        }
    }
}

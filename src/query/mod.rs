// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Remote query protocol
//!
//! Wire schema for the conversational inference endpoint and the transport
//! abstraction that performs a single request/response exchange.

pub mod mock_transport;
pub mod protocol;
pub mod transport;

pub use mock_transport::{MockReply, MockTransport, RecordedRequest};
pub use protocol::{QueryRequest, QueryResponse};
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};

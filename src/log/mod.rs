// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Conversation logs
//!
//! A log is a disposable JSON snapshot of a session, rebuilt in full on
//! every save. The credential is redacted unless the caller opts out.

pub mod record;
pub mod redaction;
pub mod store;

pub use record::{LogInstance, LogRecord, LOG_SUFFIX};
pub use redaction::{redact_token, REDACTED_TOKEN};
pub use store::LogStore;

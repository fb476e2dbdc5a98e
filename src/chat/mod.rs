// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Interactive chat flow
//!
//! Drives a session from a console: read a line, exchange it, print the
//! reply, and keep the attached log current.

pub mod repl;

pub use repl::{run_chat, QUIT_COMMAND};

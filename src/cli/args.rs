// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for Parley.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parley - chat with a hosted conversational model
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(version, about = "Chat with a hosted conversational model")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start interactive chat session (default when no command given)
    Chat(ChatArgs),

    /// Send a single message and print the reply
    Ask(AskArgs),

    /// Print the transcript of a saved log
    Show(ShowArgs),
}

/// Endpoint and token overrides shared by commands that talk to the model
#[derive(clap::Args, Debug, Default, Clone)]
pub struct RemoteArgs {
    /// Model endpoint URL (overrides settings)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API token (overrides settings and environment)
    #[arg(long)]
    pub token: Option<String>,

    /// Request timeout in seconds (overrides settings)
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Create a new log named NAME (written as NAME.chat.json)
    #[arg(short, long, conflicts_with = "load")]
    pub name: Option<String>,

    /// Store the API token in the new log instead of redacting it
    #[arg(long = "unsafe", requires = "name")]
    pub unsafe_log: bool,

    /// Resume the conversation saved in this log file
    #[arg(short, long)]
    pub load: Option<PathBuf>,

    /// Directory for new logs (overrides settings)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Arguments for the ask subcommand
#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// Message to send
    pub text: String,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

/// Arguments for the show subcommand
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Log file to print
    pub path: PathBuf,
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Parley - chat with a hosted conversational model
//!
//! Entry point for the Parley CLI application.

use clap::Parser;

use parley::cli::{ChatArgs, Cli, Commands};
use parley::commands::{run_ask, run_chat_command, run_show};
use parley::config::Settings;
use parley::error::Result;
use parley::terminal::Terminal;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on session diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        if let Ok(parsed) = "parley=debug".parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load settings
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    let mut console = Terminal::stdio();

    match cli.command {
        Some(Commands::Chat(args)) => run_chat_command(&args, settings, &mut console).await,
        Some(Commands::Ask(args)) => run_ask(&args, settings, &mut console).await,
        Some(Commands::Show(args)) => run_show(&args, &mut console),
        None => run_chat_command(&ChatArgs::default(), settings, &mut console).await,
    }
}

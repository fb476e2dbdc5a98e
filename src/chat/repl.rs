// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::Result;
use crate::query::Transport;
use crate::session::Session;
use crate::terminal::Console;

/// Line that ends the chat loop
pub const QUIT_COMMAND: &str = "/quit";

/// Run the read/exchange/print loop until end of input, an empty line or `/quit`.
///
/// Failed exchanges are reported on the console and the loop continues;
/// local failures (configuration, persistence) end the loop. Returns the
/// number of completed exchanges.
pub async fn run_chat(
    session: &mut Session,
    transport: &dyn Transport,
    console: &mut dyn Console,
) -> Result<usize> {
    let mut completed = 0;

    while let Some(line) = console.input("User : ")? {
        let text = line.trim();
        if text.is_empty() || text == QUIT_COMMAND {
            break;
        }

        match session.exchange(transport, Some(text)).await {
            Ok(reply) => {
                completed += 1;
                console.print(&format!("Bot : {}\n", reply))?;
                if session.log_path().is_some() {
                    session.save_log()?;
                }
            }
            Err(e) if !e.is_local() => {
                tracing::warn!(error = %e, "exchange failed");
                console.print(&format!("Error : {}\n", e))?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogStore;
    use crate::query::MockTransport;
    use crate::session::SessionConfig;
    use crate::terminal::Terminal;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(SessionConfig::basic("hf_test", "https://example.test")).unwrap()
    }

    #[tokio::test]
    async fn test_chat_until_end_of_input() {
        let mut session = session();
        let mock = MockTransport::new().with_response("hello").with_response("fine");
        let mut term = Terminal::new(Cursor::new("hi\nhow are you?\n"), Vec::new());

        let completed = run_chat(&mut session, &mock, &mut term).await.unwrap();

        assert_eq!(completed, 2);
        assert_eq!(session.user_turns(), vec!["hi", "how are you?"]);
        assert_eq!(session.bot_turns(), vec!["hello", "fine"]);
        let out = String::from_utf8(term.into_writer()).unwrap();
        assert!(out.contains("-> Bot : hello\n"));
        assert!(out.contains("-> Bot : fine\n"));
    }

    #[tokio::test]
    async fn test_quit_command_stops() {
        let mut session = session();
        let mock = MockTransport::new().with_response("hello");
        let mut term = Terminal::new(Cursor::new("hi\n/quit\nignored\n"), Vec::new());

        let completed = run_chat(&mut session, &mock, &mut term).await.unwrap();

        assert_eq!(completed, 1);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_is_reported_and_loop_continues() {
        let mut session = session();
        let mock = MockTransport::new()
            .with_network_error("connection refused")
            .with_response("hello");
        let mut term = Terminal::new(Cursor::new("hi\nhi again\n"), Vec::new());

        let completed = run_chat(&mut session, &mock, &mut term).await.unwrap();

        assert_eq!(completed, 1);
        assert_eq!(session.user_turns(), vec!["hi again"]);
        let out = String::from_utf8(term.into_writer()).unwrap();
        assert!(out.contains("Error : API error: Network error: connection refused"));
    }

    #[tokio::test]
    async fn test_log_saved_after_each_turn() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());
        let mut session = session();
        session.create_log(&store, "repl").unwrap();
        let mock = MockTransport::new().with_response("hello");
        let mut term = Terminal::new(Cursor::new("hi\n"), Vec::new());

        run_chat(&mut session, &mock, &mut term).await.unwrap();

        let record = LogStore::load(&store.path_for("repl")).unwrap();
        assert_eq!(record.instances.len(), 1);
        assert_eq!(record.instances[0].bot, "hello");
    }
}

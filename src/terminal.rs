// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Terminal input and output helpers

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;

use crate::error::Result;

/// Marker printed before every prompt and line of output
const LINE_PREFIX: &str = "-> ";

/// Source of user text and sink for output
pub trait Console {
    /// Show `prompt` and read one line. `None` means end of input.
    fn input(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Emit `text` as-is after the line prefix.
    fn print(&mut self, text: &str) -> Result<()>;
}

/// Line-oriented console over any reader/writer pair
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl Terminal<BufReader<Stdin>, Stdout> {
    /// Console bound to stdin/stdout with coloured prefixes
    pub fn stdio() -> Self {
        Self {
            reader: BufReader::new(io::stdin()),
            writer: io::stdout(),
            color: true,
        }
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Plain console, no colour codes
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: false,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn prefix(&mut self) -> Result<()> {
        if self.color {
            self.writer.execute(SetForegroundColor(Color::Cyan))?;
            write!(self.writer, "{}", LINE_PREFIX)?;
            self.writer.execute(ResetColor)?;
        } else {
            write!(self.writer, "{}", LINE_PREFIX)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prefix()?;
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.prefix()?;
        write!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Log persistence
//!
//! Logs are created once (never clobbering an existing file) and then
//! rewritten in full on every save via a temporary file and rename.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{ParleyError, Result};

use super::record::{LogRecord, LOG_SUFFIX};

/// Directory that holds `<name>.chat.json` logs
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LogStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log with the given name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", name, LOG_SUFFIX))
    }

    /// Write a brand new log. Fails if the file already exists.
    pub fn create(&self, name: &str, record: &LogRecord) -> Result<PathBuf> {
        let path = self.path_for(name);
        let content = record.to_json()?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => ParleyError::LogExists(path.clone()),
                _ => persistence(&path, e),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| persistence(&path, e))?;

        tracing::debug!(path = %path.display(), safe = record.safe, "created log");
        Ok(path)
    }

    /// Replace the contents of an existing log with `record`.
    pub fn save(path: &Path, record: &LogRecord) -> Result<()> {
        let content = record.to_json()?;
        let tmp_path = tmp_path(path);

        std::fs::write(&tmp_path, content).map_err(|e| persistence(&tmp_path, e))?;
        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            persistence(path, e)
        })?;

        tracing::debug!(
            path = %path.display(),
            turns = record.instances.len(),
            "saved log"
        );
        Ok(())
    }

    /// Read and decode a log.
    pub fn load(path: &Path) -> Result<LogRecord> {
        let content = std::fs::read_to_string(path).map_err(|e| persistence(path, e))?;
        LogRecord::from_json(&content).map_err(|source| ParleyError::LogFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn persistence(path: &Path, source: std::io::Error) -> ParleyError {
    ParleyError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

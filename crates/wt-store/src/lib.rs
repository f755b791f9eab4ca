//! Storage layer for the worktime logger.
//!
//! The whole log lives in a single JSON file (see [`schema`] for the format)
//! and is the unit of every read and write.
//!
//! # Atomicity
//!
//! [`Store::save`] writes the full log to a uniquely named sibling temporary
//! file (mode `0600`), syncs it, and renames it over the target. A reader
//! sees either the previous or the new log, never a torn file.
//!
//! # Concurrency
//!
//! There is no cross-process locking. Two invocations racing on
//! load-mutate-save both succeed and the last writer wins.

pub mod schema;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};
use thiserror::Error;
use wt_core::WorktimeLog;

use crate::schema::StoredLog;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the log file failed.
    #[error("failed to access worktime log {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log file exists but does not hold a valid worktime log.
    #[error("worktime log {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    fn storage(path: &Path, source: io::Error) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            source,
        }
    }

    fn corrupt(path: &Path, reason: impl ToString) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// A worktime log persisted at a fixed path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the log, or an empty log if the file does not exist.
    ///
    /// Entries stored without a day key get one from the local time zone.
    pub fn load(&self) -> Result<WorktimeLog, StoreError> {
        self.load_in(&Local)
    }

    fn load_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<WorktimeLog, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no worktime log yet, starting empty");
                return Ok(WorktimeLog::new());
            }
            Err(e) => return Err(StoreError::storage(&self.path, e)),
        };

        let stored: StoredLog = serde_json::from_str(&content)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;
        let log = stored
            .into_log(tz)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), entries = log.len(), "loaded worktime log");
        Ok(log)
    }

    /// Replaces the stored log with `log`.
    ///
    /// Creates the parent directory if needed. The file is readable and
    /// writable by its owner only.
    pub fn save(&self, log: &WorktimeLog) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(&StoredLog::from(log))
            .map_err(|e| StoreError::storage(&self.path, e.into()))?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::storage(dir, e))?;

        // a uniquely named sibling, so no existing file is touched before the rename
        let mut tmp = tempfile::Builder::new()
            .prefix(".worktime-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| StoreError::storage(dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::storage(tmp.path(), e))?;

        if let Err(e) = tmp.persist(&self.path) {
            tracing::warn!(
                from = %e.file.path().display(),
                to = %self.path.display(),
                error = %e.error,
                "failed to rename worktime log"
            );
            return Err(StoreError::storage(&self.path, e.error));
        }

        tracing::debug!(path = %self.path.display(), entries = log.len(), "saved worktime log");
        Ok(())
    }
}

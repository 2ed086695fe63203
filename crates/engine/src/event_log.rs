//! JSON-lines event log
//!
//! One `serde_json` record per line. Logging is best-effort: the first
//! failed write disables the log and play carries on.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use blockfall_core::types::Phase;

/// Environment variable naming the log file
pub const LOG_PATH_ENV: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    Phase {
        t_ms: u64,
        phase: Phase,
    },
    Lock {
        t_ms: u64,
        rows_cleared: usize,
        points_gained: u32,
        points: u32,
        top_occupied_row: Option<usize>,
    },
    LevelUp {
        t_ms: u64,
        level: u32,
        speed_ms: f64,
    },
    Ended {
        t_ms: u64,
        points: u32,
        cleared_rows: u32,
        level: u32,
    },
}

#[derive(Debug)]
pub struct EventLog<W: Write = File> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Append to the file at `path`, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(file))
    }

    /// Log configured by `BLOCKFALL_LOG_PATH`; None when unset, empty or
    /// unopenable
    pub fn from_env() -> Option<Self> {
        let path = env::var(LOG_PATH_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;
        Self::open(path).ok()
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, record: &EventRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }

    /// Give back the writer, if it is still healthy
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

//! Raw wire traffic log.
//!
//! Append-only, one line per wire message:
//! `2026/01/02 15:04:05 libera <-- PING :irc.libera.chat`.
//! Constructed once in `main` and shared by handle.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use parking_lot::Mutex;
use tracing::warn;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Which way a line travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the IRC server.
    Inbound,
    /// To the IRC server.
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inbound => "<--",
            Self::Outbound => "-->",
        })
    }
}

/// Shared raw traffic log. Writes are serialized by a mutex.
pub struct RawLog {
    file: Option<Mutex<File>>,
}

impl RawLog {
    /// Open (or create) the log file for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }

    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Record a line received from `network`.
    pub fn inbound(&self, network: &str, line: &str) {
        self.write(network, Direction::Inbound, line);
    }

    /// Record a line sent to `network`.
    pub fn outbound(&self, network: &str, line: &str) {
        self.write(network, Direction::Outbound, line);
    }

    fn write(&self, network: &str, direction: Direction, line: &str) {
        let Some(file) = &self.file else {
            return;
        };

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let line = line.trim_end_matches(['\r', '\n']);
        if let Err(e) = writeln!(file.lock(), "{} {} {} {}", timestamp, network, direction, line) {
            warn!(network = %network, error = %e, "Failed to write raw log");
        }
    }
}

impl fmt::Debug for RawLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

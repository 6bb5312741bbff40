#![warn(missing_docs)]
//! Headless test surfaces: fake players, fixed permission tables and a JSONL event log.

mod oracle;
mod viewer;

use anyhow::Result;
use invmenu_core::{PlayerId, Tick};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use oracle::StaticOracle;
pub use viewer::{RecordingViewer, ViewerLog};

/// One line of a session event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Engine tick the event was delivered on.
    pub tick: Tick,
    /// Player the event concerns.
    pub player: PlayerId,
    /// Short kind label, e.g. `Click`.
    pub kind: &'a str,
    /// Free-form detail.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

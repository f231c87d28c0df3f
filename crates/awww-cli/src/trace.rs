//! Recorded input traces.
//!
//! A trace is a JSON-lines file, one device event per line:
//!
//! ```text
//! {"at_ms": 0, "event": {"type": "wheel", "x": 0, "y": 0, "delta_y": -1}}
//! {"at_ms": 40, "event": {"type": "wheel", "x": 0, "y": 0, "delta_y": -1}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use awww_core::DeviceEvent;
use serde::Deserialize;

/// One timestamped device event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraceRecord {
    /// Milliseconds since the start of the trace.
    pub at_ms: u64,
    /// The recorded event.
    pub event: DeviceEvent,
}

impl TraceRecord {
    /// Timestamp as a duration.
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// Parses trace text.
pub fn parse_trace(text: &str) -> anyhow::Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(line)
            .with_context(|| format!("Invalid trace record on line {}", number + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Reads a trace file.
pub fn read_trace(path: &Path) -> anyhow::Result<Vec<TraceRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    parse_trace(&text)
}

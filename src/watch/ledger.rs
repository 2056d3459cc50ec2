// src/watch/ledger.rs

use std::collections::HashMap;
use std::time::SystemTime;

/// Per-signal record of the last marker-file modification time that was
/// already dispatched.
///
/// Owned exclusively by the local channel's check loop; tests construct fresh
/// ledgers and drive them directly. Starts empty, so the first file observed
/// after process start is always dispatched: the local directory's resting
/// state is absence, which makes presence itself meaningful.
#[derive(Debug, Default)]
pub struct LocalLedger {
    handled: HashMap<String, SystemTime>,
}

impl LocalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `mtime` as handled for `signal` and report whether it was new.
    ///
    /// Returns `false` for ties and regressions (`mtime <= last handled`):
    /// the redundant fallback scan re-observing a write the debounced path
    /// already handled must stay quiet, as must touch-without-write and clock
    /// skew. The record is updated *before* the caller reads file content or
    /// dispatches, so a concurrent duplicate check cannot double-fire.
    pub fn mark_if_newer(&mut self, signal: &str, mtime: SystemTime) -> bool {
        match self.handled.get(signal) {
            Some(last) if mtime <= *last => false,
            _ => {
                self.handled.insert(signal.to_string(), mtime);
                true
            }
        }
    }

    /// The last handled modification time for `signal`, if any.
    pub fn last_handled(&self, signal: &str) -> Option<SystemTime> {
        self.handled.get(signal).copied()
    }
}

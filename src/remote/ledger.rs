// src/remote/ledger.rs

use std::collections::HashMap;

/// Outcome of comparing a fetched fingerprint against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteObservation {
    /// First fingerprint seen for this signal since process start. Recorded
    /// but never dispatched: the remote store persists across restarts, so
    /// whatever is there was in all likelihood already handled by a previous
    /// run.
    Baseline,
    /// Same fingerprint as last time; nothing happened.
    Unchanged,
    /// A different fingerprint than the recorded one; dispatch.
    Changed,
}

/// Per-signal record of the last remote version fingerprint observed.
///
/// Owned exclusively by the poll loop; tests construct fresh ledgers and
/// drive them directly. Fingerprints are opaque; only equality matters.
#[derive(Debug, Default)]
pub struct RemoteLedger {
    known: HashMap<String, String>,
}

impl RemoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `fingerprint` against the stored version for `signal`, record
    /// it, and classify the observation.
    ///
    /// The record is updated before the caller dispatches. Failed fetches
    /// must simply not call this, which leaves the pre-failure fingerprint
    /// in place for the next successful tick to compare against.
    pub fn observe(&mut self, signal: &str, fingerprint: &str) -> RemoteObservation {
        match self.known.get(signal) {
            None => {
                self.known.insert(signal.to_string(), fingerprint.to_string());
                RemoteObservation::Baseline
            }
            Some(prev) if prev == fingerprint => RemoteObservation::Unchanged,
            Some(_) => {
                self.known.insert(signal.to_string(), fingerprint.to_string());
                RemoteObservation::Changed
            }
        }
    }

    /// The last recorded fingerprint for `signal`, if any.
    pub fn last_known(&self, signal: &str) -> Option<&str> {
        self.known.get(signal).map(String::as_str)
    }
}

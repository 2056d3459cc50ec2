// src/watch/debounce.rs

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// One pending timer slot per signal, keyed by name.
///
/// Scheduling a signal that already has a pending slot cancels the old timer
/// and starts a fresh one, so a burst of change notifications inside the
/// quiet window collapses into a single check request sent after the burst
/// subsides. Checks are requested over `check_tx`; the receiving loop owns
/// the ledger and does the actual stat/dispatch work.
#[derive(Debug)]
pub struct DebounceMap {
    delay: Duration,
    check_tx: mpsc::Sender<String>,
    slots: HashMap<String, JoinHandle<()>>,
}

impl DebounceMap {
    pub fn new(delay: Duration, check_tx: mpsc::Sender<String>) -> Self {
        Self {
            delay,
            check_tx,
            slots: HashMap::new(),
        }
    }

    /// Cancel any pending timer for `signal` and start a new one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, signal: &str) {
        if let Some(handle) = self.slots.remove(signal) {
            // Aborting an already-finished timer is a no-op.
            handle.abort();
        }

        debug!(signal = %signal, delay = ?self.delay, "debounce timer (re)scheduled");

        let tx = self.check_tx.clone();
        let name = signal.to_string();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The check loop shutting down just means the timer fires into
            // the void; nothing to do about it here.
            let _ = tx.send(name).await;
        });

        self.slots.insert(signal.to_string(), handle);
    }
}

impl Drop for DebounceMap {
    fn drop(&mut self) {
        for handle in self.slots.values() {
            handle.abort();
        }
    }
}

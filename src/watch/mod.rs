// src/watch/mod.rs

//! The local channel: marker files on disk.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) over the marker
//!   directory, debounced per signal.
//! - Running the periodic full-scan fallback for platforms/filesystems where
//!   change notifications are unreliable.
//! - Deduplicating checks against the per-signal mtime ledger so each file
//!   update is dispatched exactly once.
//!
//! It does **not** know about the remote channel; the two only share the
//! read-only registry.

pub mod debounce;
pub mod ledger;
pub mod watcher;

pub use debounce::DebounceMap;
pub use ledger::LocalLedger;
pub use watcher::{check_signal, spawn_local_watcher, LocalWatchOptions, WatcherHandle};

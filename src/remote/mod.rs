// src/remote/mod.rs

//! The remote channel: mirrored marker files in a repository.
//!
//! This module is responsible for:
//! - Fetching each signal's remote marker through the repository contents API
//!   (`source.rs`), one GET per signal per tick.
//! - Comparing version fingerprints against the per-signal ledger and
//!   suppressing the first observation after process start (`ledger.rs`,
//!   `poller.rs`).
//!
//! Polling is deliberate: the remote store offers no push channel to this
//! process, and fingerprint comparison avoids re-downloading unchanged
//! content tick after tick.

pub mod ledger;
pub mod poller;
pub mod source;

pub use ledger::{RemoteLedger, RemoteObservation};
pub use poller::{handle_fetch_result, poll_once, spawn_remote_poller, RemotePollOptions};
pub use source::{GitHubMarkerSource, MarkerSource, RemoteMarker};

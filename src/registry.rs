// src/registry.rs

//! The static catalog of watched signals.
//!
//! Built once from config at startup and shared read-only by both channels.
//! There is deliberately no runtime registration: a fixed catalog bounds the
//! state both ledgers have to carry, and adding a signal means a restart.

use crate::config::model::ConfigFile;

/// A named one-directional alert channel between two logical agents.
///
/// `name` doubles as the marker filename, locally and in the remote
/// repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub name: String,
    pub from_agent: String,
    pub to_agent: String,
}

/// Ordered, immutable set of signals for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct SignalRegistry {
    signals: Vec<Signal>,
}

impl SignalRegistry {
    /// Build the registry from the `[signal.*]` config sections.
    ///
    /// Name uniqueness is guaranteed by the config being a map; semantic
    /// checks (non-empty names and agents) happen in config validation.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let signals = cfg
            .signal
            .iter()
            .map(|(name, sc)| Signal {
                name: name.clone(),
                from_agent: sc.from.clone(),
                to_agent: sc.to.clone(),
            })
            .collect();

        Self { signals }
    }

    /// Look up a signal by name (exact match).
    pub fn get(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Whether `name` is a watched signal.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate signals in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }

    /// Iterate signal names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

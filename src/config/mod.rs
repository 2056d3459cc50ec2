// src/config/mod.rs

//! Configuration loading and validation for relaybell.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to built-in defaults
//!   (`loader.rs`).
//! - Validate basic invariants like cadences and signal names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, LocalSection, RemoteSection, SignalConfig};
pub use validate::validate_config;

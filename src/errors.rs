// src/errors.rs

//! Crate-wide error aliases.
//!
//! Everything transient in this crate is logged and swallowed where it
//! happens; only bootstrap failures propagate, so a thin `anyhow` wrapper is
//! all that is needed here.

pub use anyhow::{Error, Result};

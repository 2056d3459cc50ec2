// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from `path` if it exists, otherwise use built-in defaults.
///
/// This is the entry point used by `run()`. A missing config file is the
/// normal first-run experience, where the built-in two-signal catalog and
/// local-only mode apply; a file that exists but fails to parse or validate
/// is still a hard error.
pub fn load_or_default(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        return load_and_validate(path);
    }

    debug!(path = ?path, "config file not found, using built-in defaults");
    let config = ConfigFile::default();
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve the default config path.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Relaybell.toml")
}

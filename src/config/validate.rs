// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - there is at least one signal
/// - signal names are usable as plain filenames
/// - `from` / `to` agent names are non-empty
/// - local scan/debounce cadences are non-zero
/// - the remote section, if present, has complete coordinates
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_signals(cfg)?;
    validate_local(cfg)?;
    validate_remote(cfg)?;
    Ok(())
}

fn validate_signals(cfg: &ConfigFile) -> Result<()> {
    if cfg.signal.is_empty() {
        return Err(anyhow!(
            "config must contain at least one [signal.<name>] section"
        ));
    }

    for (name, signal) in cfg.signal.iter() {
        if name.trim().is_empty() {
            return Err(anyhow!("signal names must not be empty"));
        }
        // The name doubles as a marker filename in both channels.
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(anyhow!(
                "signal name '{}' is not usable as a plain filename",
                name
            ));
        }
        if signal.from.trim().is_empty() {
            return Err(anyhow!("signal '{}' has an empty `from` agent", name));
        }
        if signal.to.trim().is_empty() {
            return Err(anyhow!("signal '{}' has an empty `to` agent", name));
        }
    }

    Ok(())
}

fn validate_local(cfg: &ConfigFile) -> Result<()> {
    if cfg.local.dir.trim().is_empty() {
        return Err(anyhow!("[local].dir must not be empty"));
    }
    if cfg.local.scan_interval_secs == 0 {
        return Err(anyhow!("[local].scan_interval_secs must be >= 1 (got 0)"));
    }
    if cfg.local.debounce_ms == 0 {
        return Err(anyhow!("[local].debounce_ms must be >= 1 (got 0)"));
    }
    Ok(())
}

fn validate_remote(cfg: &ConfigFile) -> Result<()> {
    let Some(remote) = &cfg.remote else {
        return Ok(());
    };

    if remote.owner.trim().is_empty() {
        return Err(anyhow!("[remote].owner must not be empty"));
    }
    if remote.repo.trim().is_empty() {
        return Err(anyhow!("[remote].repo must not be empty"));
    }
    if remote.branch.trim().is_empty() {
        return Err(anyhow!("[remote].branch must not be empty"));
    }
    if remote.poll_interval_secs == 0 {
        return Err(anyhow!("[remote].poll_interval_secs must be >= 1 (got 0)"));
    }
    if remote.api_base.trim().is_empty() {
        return Err(anyhow!("[remote].api_base must not be empty"));
    }

    Ok(())
}

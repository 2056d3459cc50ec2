// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [local]
/// dir = "agent-messages"
/// scan_interval_secs = 5
/// debounce_ms = 750
///
/// [remote]
/// owner = "someone"
/// repo = "agent-bridge"
/// branch = "main"
///
/// [signal.notify-cascade]
/// from = "Cascade"
/// to = "Replit"
/// ```
///
/// All sections are optional and have reasonable defaults; `[remote]` is
/// absent by default, which disables the remote channel entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Local marker directory settings from `[local]`.
    #[serde(default)]
    pub local: LocalSection,

    /// Remote repository coordinates from `[remote]`, if any.
    #[serde(default)]
    pub remote: Option<RemoteSection>,

    /// All signals from `[signal.<name>]`.
    ///
    /// Keys are the *signal names*, which double as the marker filenames.
    #[serde(default = "default_signals")]
    pub signal: BTreeMap<String, SignalConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            local: LocalSection::default(),
            remote: None,
            signal: default_signals(),
        }
    }
}

/// `[local]` section: where marker files live and how often they are checked.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalSection {
    /// Directory holding the marker files, relative to the working directory.
    ///
    /// Created at startup if missing; failure to create it is fatal.
    #[serde(default = "default_local_dir")]
    pub dir: String,

    /// Cadence of the full-scan fallback that catches filesystem events the
    /// platform watcher missed.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Quiet window after a change notification before the marker file is
    /// actually checked. Coalesces editor write-then-rename bursts.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_local_dir() -> String {
    "agent-messages".to_string()
}

fn default_scan_interval_secs() -> u64 {
    5
}

fn default_debounce_ms() -> u64 {
    750
}

impl Default for LocalSection {
    fn default() -> Self {
        Self {
            dir: default_local_dir(),
            scan_interval_secs: default_scan_interval_secs(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// `[remote]` section: the repository that holds the mirrored marker files.
///
/// Markers are fetched through the repository contents API, one GET per
/// signal per poll tick.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    /// Repository owner (user or organisation).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Branch to read marker files from.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Directory inside the repository holding the marker files.
    ///
    /// An empty string means the repository root.
    #[serde(default = "default_local_dir")]
    pub dir: String,

    /// Cadence of the remote poll.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Name of the environment variable holding an API token.
    ///
    /// The variable being unset is fine; the poller then fetches
    /// unauthenticated, which works for public repositories.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Base URL of the contents API. Overridable for enterprise installs.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// `[signal.<name>]` section.
///
/// One entry per watched signal; the section name is the marker filename.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignalConfig {
    /// The agent that raises this signal (i.e. writes the marker).
    pub from: String,

    /// The agent meant to be alerted.
    pub to: String,
}

/// Built-in signal catalog used when the config has no `[signal.*]` sections.
fn default_signals() -> BTreeMap<String, SignalConfig> {
    let mut map = BTreeMap::new();
    map.insert(
        "notify-cascade".to_string(),
        SignalConfig {
            from: "Cascade".to_string(),
            to: "Replit".to_string(),
        },
    );
    map.insert(
        "notify-replit".to_string(),
        SignalConfig {
            from: "Replit".to_string(),
            to: "Cascade".to_string(),
        },
    );
    map
}

// src/watch/watcher.rs

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::alert::{AlertChannel, AlertEvent};
use crate::registry::{Signal, SignalRegistry};
use crate::watch::debounce::DebounceMap;
use crate::watch::ledger::LocalLedger;

/// Tunables for the local channel.
#[derive(Debug, Clone)]
pub struct LocalWatchOptions {
    /// The marker directory. Must exist before the watcher starts.
    pub dir: PathBuf,
    /// Quiet window between a change notification and the actual check.
    pub debounce: Duration,
    /// Cadence of the full-scan fallback.
    pub scan_interval: Duration,
}

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching; the
/// fallback scan keeps running regardless.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn the local channel: a filesystem watcher over the marker directory,
/// a periodic full-scan fallback, and the check loop that owns the ledger.
///
/// Change notifications are debounced per signal; both the debounced path and
/// the fallback scan funnel into the same check loop, where the mtime ledger
/// decides whether anything is actually new. The first scan runs immediately,
/// so marker files already present at startup are dispatched right away.
pub fn spawn_local_watcher(
    options: LocalWatchOptions,
    registry: Arc<SignalRegistry>,
    alert_tx: mpsc::Sender<AlertEvent>,
) -> Result<WatcherHandle> {
    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Channel of "check this signal now" requests into the ledger loop.
    let (check_tx, check_rx) = mpsc::channel::<String>(64);

    let mut watcher = RecommendedWatcher::new(
        {
            let event_tx = event_tx.clone();
            move |res: notify::Result<Event>| {
                match res {
                    Ok(event) => {
                        if let Err(err) = event_tx.send(event) {
                            // We can't log via tracing here easily, so fallback to stderr.
                            eprintln!("relaybell: failed to forward notify event: {err}");
                        }
                    }
                    Err(err) => {
                        eprintln!("relaybell: file watch error: {err}");
                    }
                }
            }
        },
        Config::default(),
    )?;

    // The marker directory is flat; nothing to recurse into.
    watcher.watch(&options.dir, RecursiveMode::NonRecursive)?;

    info!("marker file watcher started on {:?}", options.dir);

    // Task 1: notify events -> per-signal debounce timers.
    {
        let registry = Arc::clone(&registry);
        let mut debounce = DebounceMap::new(options.debounce, check_tx.clone());
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                debug!("received notify event: {:?}", event);

                for path in &event.paths {
                    if let Some(name) = signal_for_path(&registry, path) {
                        debounce.schedule(name);
                    }
                }
            }

            debug!("notify event loop ended");
        });
    }

    // Task 2: fallback scan over the whole catalog. The first tick fires
    // immediately, which doubles as the startup scan.
    {
        let registry = Arc::clone(&registry);
        let check_tx = check_tx.clone();
        let scan_interval = options.scan_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(scan_interval);
            loop {
                interval.tick().await;
                for name in registry.names() {
                    if check_tx.send(name.to_string()).await.is_err() {
                        debug!("check loop gone, stopping fallback scan");
                        return;
                    }
                }
            }
        });
    }

    // Task 3: the check loop. Sole owner of the mtime ledger.
    {
        let registry = Arc::clone(&registry);
        let dir = options.dir.clone();
        tokio::spawn(run_check_loop(dir, registry, check_rx, alert_tx));
    }

    Ok(WatcherHandle { _inner: watcher })
}

async fn run_check_loop(
    dir: PathBuf,
    registry: Arc<SignalRegistry>,
    mut check_rx: mpsc::Receiver<String>,
    alert_tx: mpsc::Sender<AlertEvent>,
) {
    let mut ledger = LocalLedger::new();

    while let Some(name) = check_rx.recv().await {
        let Some(signal) = registry.get(&name) else {
            continue;
        };
        check_signal(&dir, signal, &mut ledger, &alert_tx).await;
    }

    debug!("local check loop ended");
}

/// Check one signal's marker file and dispatch if it changed.
///
/// The ledger is updated before content is read or the alert is sent, so a
/// duplicate check racing in behind this one (debounce + fallback scan firing
/// for the same write) sees the mtime as already handled and stays quiet.
/// All I/O errors are contained here: absence is the normal resting state,
/// anything else is logged and skipped so one signal's trouble never halts
/// monitoring of the others.
pub async fn check_signal(
    dir: &Path,
    signal: &Signal,
    ledger: &mut LocalLedger,
    alert_tx: &mpsc::Sender<AlertEvent>,
) {
    let path = dir.join(&signal.name);

    let meta = match tokio::fs::metadata(&path).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return,
        Err(err) => {
            warn!(signal = %signal.name, error = %err, "stat failed on marker file");
            return;
        }
    };

    let mtime = match meta.modified() {
        Ok(mtime) => mtime,
        Err(err) => {
            warn!(
                signal = %signal.name,
                error = %err,
                "filesystem does not report modification times"
            );
            return;
        }
    };

    if !ledger.mark_if_newer(&signal.name, mtime) {
        return;
    }

    // Content is advisory: a failed read still produces an alert, just
    // without context.
    let context = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            warn!(signal = %signal.name, error = %err, "could not read marker content");
            String::new()
        }
    };

    info!(
        signal = %signal.name,
        from = %signal.from_agent,
        "local marker updated"
    );

    let event = AlertEvent::new(
        &signal.name,
        &signal.from_agent,
        context,
        AlertChannel::LocalFile,
    );
    if alert_tx.send(event).await.is_err() {
        warn!("alert dispatcher channel closed, dropping local alert");
    }
}

/// Map a changed path to a watched signal name, if the filename matches one.
fn signal_for_path<'a>(registry: &'a SignalRegistry, path: &Path) -> Option<&'a str> {
    let name = path.file_name()?.to_str()?;
    registry.get(name).map(|s| s.name.as_str())
}

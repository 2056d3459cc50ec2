// src/remote/poller.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::alert::{AlertChannel, AlertEvent};
use crate::registry::SignalRegistry;
use crate::remote::ledger::{RemoteLedger, RemoteObservation};
use crate::remote::source::{MarkerSource, RemoteMarker};

/// Tunables for the remote channel.
#[derive(Debug, Clone)]
pub struct RemotePollOptions {
    /// Cadence of the poll. The first poll fires immediately at startup.
    pub interval: Duration,
}

/// Spawn the remote poll loop.
///
/// Each tick spawns one fetch task per signal; results funnel back into the
/// loop over a channel, so a hung fetch delays only its own signal while the
/// rest of the catalog keeps flowing. The loop is the sole owner of the
/// fingerprint ledger.
pub fn spawn_remote_poller(
    source: Arc<dyn MarkerSource>,
    registry: Arc<SignalRegistry>,
    options: RemotePollOptions,
    alert_tx: mpsc::Sender<AlertEvent>,
) -> JoinHandle<()> {
    tokio::spawn(run_poll_loop(source, registry, options, alert_tx))
}

async fn run_poll_loop(
    source: Arc<dyn MarkerSource>,
    registry: Arc<SignalRegistry>,
    options: RemotePollOptions,
    alert_tx: mpsc::Sender<AlertEvent>,
) {
    info!(interval = ?options.interval, "remote poller started");

    let mut ledger = RemoteLedger::new();
    let mut interval = tokio::time::interval(options.interval);

    // Fetch results come back through here. Keeping our own sender alive
    // means recv() never closes on us.
    let (result_tx, mut result_rx) = mpsc::channel::<(String, Option<RemoteMarker>)>(64);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for name in registry.names() {
                    let source = Arc::clone(&source);
                    let result_tx = result_tx.clone();
                    let name = name.to_string();
                    tokio::spawn(async move {
                        let fetched = match source.fetch(&name).await {
                            Ok(found) => found,
                            Err(err) => {
                                // Transient by definition; the next tick retries.
                                debug!(signal = %name, error = %err, "remote fetch failed");
                                None
                            }
                        };
                        let _ = result_tx.send((name, fetched)).await;
                    });
                }
            }
            Some((name, fetched)) = result_rx.recv() => {
                handle_fetch_result(&registry, &mut ledger, &alert_tx, &name, fetched).await;
            }
        }
    }
}

/// Fold one fetch result into the ledger and dispatch on a genuine change.
///
/// `None` (absent marker or failed fetch) leaves the ledger untouched, so the
/// next successful fetch is still compared against the last fingerprint that
/// was actually seen. The ledger records before dispatching.
pub async fn handle_fetch_result(
    registry: &SignalRegistry,
    ledger: &mut RemoteLedger,
    alert_tx: &mpsc::Sender<AlertEvent>,
    name: &str,
    fetched: Option<RemoteMarker>,
) {
    let Some(marker) = fetched else {
        return;
    };
    let Some(signal) = registry.get(name) else {
        return;
    };

    match ledger.observe(name, &marker.fingerprint) {
        RemoteObservation::Baseline => {
            debug!(
                signal = %name,
                fingerprint = %marker.fingerprint,
                "recorded baseline fingerprint"
            );
        }
        RemoteObservation::Unchanged => {}
        RemoteObservation::Changed => {
            info!(
                signal = %name,
                from = %signal.from_agent,
                fingerprint = %marker.fingerprint,
                "remote marker changed"
            );

            let event = AlertEvent::new(
                &signal.name,
                &signal.from_agent,
                marker.content,
                AlertChannel::RemotePoll,
            );
            if alert_tx.send(event).await.is_err() {
                warn!("alert dispatcher channel closed, dropping remote alert");
            }
        }
    }
}

/// Run a single sequential poll over the whole catalog (`--once` mode).
pub async fn poll_once(
    source: &dyn MarkerSource,
    registry: &SignalRegistry,
    ledger: &mut RemoteLedger,
    alert_tx: &mpsc::Sender<AlertEvent>,
) {
    for name in registry.names() {
        let fetched = match source.fetch(name).await {
            Ok(found) => found,
            Err(err) => {
                debug!(signal = %name, error = %err, "remote fetch failed");
                None
            }
        };
        handle_fetch_result(registry, ledger, alert_tx, name, fetched).await;
    }
}

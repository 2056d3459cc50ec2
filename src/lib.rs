// src/lib.rs

pub mod alert;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod registry;
pub mod remote;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::alert::{ClipboardTransport, DesktopToastTransport, Transport};
use crate::cli::CliArgs;
use crate::config::loader::load_or_default;
use crate::config::model::ConfigFile;
use crate::registry::SignalRegistry;
use crate::remote::{GitHubMarkerSource, MarkerSource, RemoteLedger, RemotePollOptions};
use crate::watch::{LocalLedger, LocalWatchOptions};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the signal registry
/// - the alert dispatcher and its transports
/// - the local channel (file watcher + fallback scan)
/// - the remote channel (poller), when configured
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_or_default(&config_path)?;

    let registry = Arc::new(SignalRegistry::from_config(&cfg));

    if args.dry_run {
        print_dry_run(&cfg, &registry);
        return Ok(());
    }

    // The marker directory must exist before watching can start. This is the
    // one unrecoverable failure in the whole program.
    let marker_dir = PathBuf::from(&cfg.local.dir);
    std::fs::create_dir_all(&marker_dir)
        .with_context(|| format!("creating local marker directory at {:?}", marker_dir))?;

    let transports: Vec<Box<dyn Transport>> = vec![
        Box::new(ClipboardTransport::platform_default()),
        Box::new(DesktopToastTransport::new("Agent message")),
    ];
    let (alert_tx, dispatcher) = alert::spawn_dispatcher(transports);

    let remote_source: Option<Arc<dyn MarkerSource>> = match &cfg.remote {
        Some(section) => Some(Arc::new(GitHubMarkerSource::new(section)?)),
        None => {
            info!("no [remote] section configured; remote channel disabled");
            None
        }
    };

    if args.once {
        run_once(&registry, remote_source.as_deref(), &marker_dir, alert_tx).await;
        let _ = dispatcher.await;
        return Ok(());
    }

    let _watcher_handle = watch::spawn_local_watcher(
        LocalWatchOptions {
            dir: marker_dir.clone(),
            debounce: Duration::from_millis(cfg.local.debounce_ms),
            scan_interval: Duration::from_secs(cfg.local.scan_interval_secs),
        },
        Arc::clone(&registry),
        alert_tx.clone(),
    )?;

    if let (Some(source), Some(section)) = (remote_source, &cfg.remote) {
        remote::spawn_remote_poller(
            source,
            Arc::clone(&registry),
            RemotePollOptions {
                interval: Duration::from_secs(section.poll_interval_secs),
            },
            alert_tx.clone(),
        );
    }

    info!(
        signals = registry.len(),
        dir = ?marker_dir,
        "relaybell watching for messages"
    );

    tokio::signal::ctrl_c()
        .await
        .context("listening for Ctrl+C")?;
    info!("shutdown requested, stopping");

    // Dropping the last sender lets the dispatcher drain and finish.
    drop(alert_tx);
    let _ = dispatcher.await;

    Ok(())
}

/// Single-pass mode: one local scan and one remote poll against fresh
/// ledgers, then exit.
///
/// Local markers already on disk are dispatched; remote markers only
/// establish baselines, since there is no prior record to compare against
/// within this single pass.
async fn run_once(
    registry: &SignalRegistry,
    remote_source: Option<&dyn MarkerSource>,
    marker_dir: &std::path::Path,
    alert_tx: tokio::sync::mpsc::Sender<alert::AlertEvent>,
) {
    info!("running a single scan + poll pass");

    let mut local = LocalLedger::new();
    for signal in registry.iter() {
        watch::check_signal(marker_dir, signal, &mut local, &alert_tx).await;
    }

    if let Some(source) = remote_source {
        let mut ledger = RemoteLedger::new();
        remote::poll_once(source, registry, &mut ledger, &alert_tx).await;
    }
}

/// Simple dry-run output: print effective config and the signal catalog.
fn print_dry_run(cfg: &ConfigFile, registry: &SignalRegistry) {
    println!("relaybell dry-run");
    println!("  local.dir = {}", cfg.local.dir);
    println!("  local.scan_interval_secs = {}", cfg.local.scan_interval_secs);
    println!("  local.debounce_ms = {}", cfg.local.debounce_ms);

    match &cfg.remote {
        Some(remote) => {
            println!("  remote = {}/{} @ {}", remote.owner, remote.repo, remote.branch);
            println!("  remote.dir = {}", remote.dir);
            println!("  remote.poll_interval_secs = {}", remote.poll_interval_secs);
        }
        None => println!("  remote = (disabled)"),
    }
    println!();

    println!("signals ({}):", registry.len());
    for signal in registry.iter() {
        println!("  - {}", signal.name);
        println!("      from: {}", signal.from_agent);
        println!("      to:   {}", signal.to_agent);
    }
}

// src/alert/dispatcher.rs

use std::time::SystemTime;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::alert::transports::Transport;

/// Which observation channel produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertChannel {
    LocalFile,
    RemotePoll,
}

/// An ephemeral notification event.
///
/// Exists only for the duration of a dispatch; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    /// Registry name of the signal that fired.
    pub signal: String,
    /// The agent that raised the signal.
    pub from_agent: String,
    /// Free-text payload, already trimmed. May be empty.
    pub context: String,
    /// Which channel observed the occurrence.
    pub channel: AlertChannel,
    /// When the observing channel emitted this event.
    pub emitted_at: SystemTime,
}

impl AlertEvent {
    pub fn new(
        signal: impl Into<String>,
        from_agent: impl Into<String>,
        context: impl Into<String>,
        channel: AlertChannel,
    ) -> Self {
        Self {
            signal: signal.into(),
            from_agent: from_agent.into(),
            context: context.into(),
            channel,
            emitted_at: SystemTime::now(),
        }
    }
}

/// Compose the human-readable prompt delivered by every transport.
///
/// The context clause is omitted entirely when the context is empty, rather
/// than trailing an empty quote.
pub fn compose_prompt(from_agent: &str, context: &str) -> String {
    if context.is_empty() {
        format!("{from_agent} left you a new message.")
    } else {
        format!("{from_agent} left you a new message: {context}")
    }
}

/// Spawn the dispatcher loop.
///
/// The returned sender is what both channels use to raise alerts. The join
/// handle completes once every sender has been dropped and the queue is
/// drained, which is how shutdown avoids losing a final in-flight alert.
pub fn spawn_dispatcher(
    transports: Vec<Box<dyn Transport>>,
) -> (mpsc::Sender<AlertEvent>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<AlertEvent>(32);

    let handle = tokio::spawn(async move {
        info!("alert dispatcher started");
        while let Some(event) = rx.recv().await {
            deliver_all(&transports, &event).await;
        }
        info!("alert dispatcher finished (channel closed)");
    });

    (tx, handle)
}

/// Deliver one event: console banner first, then every transport in turn.
///
/// Transports are independent; a failure is logged and the next one still
/// runs. Nothing here can abort the watch loops.
pub async fn deliver_all(transports: &[Box<dyn Transport>], event: &AlertEvent) {
    let prompt = compose_prompt(&event.from_agent, &event.context);
    debug!(signal = %event.signal, channel = ?event.channel, "dispatching alert");

    print_banner(&prompt);

    for transport in transports {
        match transport.deliver(&prompt).await {
            Ok(()) => debug!(transport = transport.name(), "alert delivered"),
            Err(err) => warn!(
                transport = transport.name(),
                error = %err,
                "transport delivery failed; message available on the console only"
            ),
        }
    }
}

/// The transport of last resort. Writing to stdout is not allowed to fail
/// silently, so this is plain `println!`.
fn print_banner(prompt: &str) {
    println!();
    println!("============================================================");
    println!("  {prompt}");
    println!("============================================================");
    println!();
}

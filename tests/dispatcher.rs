use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use relaybell::alert::{
    compose_prompt, deliver_all, AlertChannel, AlertEvent, ClipboardProvider,
    ClipboardTransport, Transport,
};

/// Transport that records every prompt it is given.
#[derive(Clone, Default)]
struct Recorder {
    delivered: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Transport for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn deliver(&self, prompt: &str) -> Result<()> {
        self.delivered.lock().expect("lock").push(prompt.to_string());
        Ok(())
    }
}

/// Transport that always fails.
struct AlwaysFails;

#[async_trait]
impl Transport for AlwaysFails {
    fn name(&self) -> &'static str {
        "always-fails"
    }

    async fn deliver(&self, _prompt: &str) -> Result<()> {
        bail!("this transport never works")
    }
}

#[test]
fn prompt_embeds_agent_and_context() {
    assert_eq!(
        compose_prompt("Cascade", "ping"),
        "Cascade left you a new message: ping"
    );
}

#[test]
fn prompt_omits_empty_context_clause() {
    assert_eq!(compose_prompt("Replit", ""), "Replit left you a new message.");
}

#[tokio::test]
async fn failing_transport_does_not_block_the_next_one() {
    let recorder = Recorder::default();
    let transports: Vec<Box<dyn Transport>> =
        vec![Box::new(AlwaysFails), Box::new(recorder.clone())];

    let event = AlertEvent::new("notify-cascade", "Cascade", "ping", AlertChannel::LocalFile);
    deliver_all(&transports, &event).await;

    let delivered = recorder.delivered.lock().expect("lock");
    assert_eq!(delivered.as_slice(), ["Cascade left you a new message: ping"]);
}

#[tokio::test]
async fn every_transport_gets_the_same_prompt() {
    let first = Recorder::default();
    let second = Recorder::default();
    let transports: Vec<Box<dyn Transport>> =
        vec![Box::new(first.clone()), Box::new(second.clone())];

    let event = AlertEvent::new("notify-replit", "Replit", "", AlertChannel::RemotePoll);
    deliver_all(&transports, &event).await;

    let expected = ["Replit left you a new message."];
    assert_eq!(first.delivered.lock().expect("lock").as_slice(), expected);
    assert_eq!(second.delivered.lock().expect("lock").as_slice(), expected);
}

#[cfg(unix)]
#[tokio::test]
async fn clipboard_chain_falls_through_to_a_working_provider() {
    let transport = ClipboardTransport::with_providers(vec![
        ClipboardProvider {
            name: "missing",
            program: "relaybell-no-such-program",
            args: &[],
        },
        // `cat` consumes stdin and exits 0, standing in for a real clipboard.
        ClipboardProvider {
            name: "cat",
            program: "cat",
            args: &[],
        },
    ]);

    assert!(transport.deliver("hello").await.is_ok());
}

#[cfg(unix)]
#[tokio::test]
async fn clipboard_chain_reports_failure_when_everything_fails() {
    let transport = ClipboardTransport::with_providers(vec![ClipboardProvider {
        name: "missing",
        program: "relaybell-no-such-program",
        args: &[],
    }]);

    assert!(transport.deliver("hello").await.is_err());
}

#[tokio::test]
async fn empty_provider_chain_is_an_error() {
    let transport = ClipboardTransport::with_providers(vec![]);
    assert!(transport.deliver("hello").await.is_err());
}

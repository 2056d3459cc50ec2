use std::error::Error;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use relaybell::alert::AlertChannel;
use relaybell::registry::Signal;
use relaybell::watch::{check_signal, LocalLedger};

type TestResult = Result<(), Box<dyn Error>>;

fn cascade() -> Signal {
    Signal {
        name: "notify-cascade".to_string(),
        from_agent: "Cascade".to_string(),
        to_agent: "Replit".to_string(),
    }
}

#[tokio::test]
async fn absent_marker_is_the_resting_state() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut ledger = LocalLedger::new();
    let (tx, mut rx) = mpsc::channel(8);

    check_signal(dir.path(), &cascade(), &mut ledger, &tx).await;

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    assert!(ledger.last_handled("notify-cascade").is_none());

    Ok(())
}

#[tokio::test]
async fn present_marker_dispatches_trimmed_content() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("notify-cascade"), "  ping \n")?;

    let mut ledger = LocalLedger::new();
    let (tx, mut rx) = mpsc::channel(8);

    check_signal(dir.path(), &cascade(), &mut ledger, &tx).await;

    let event = rx.try_recv()?;
    assert_eq!(event.signal, "notify-cascade");
    assert_eq!(event.from_agent, "Cascade");
    assert_eq!(event.context, "ping");
    assert_eq!(event.channel, AlertChannel::LocalFile);

    Ok(())
}

#[tokio::test]
async fn unchanged_marker_is_not_dispatched_twice() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("notify-cascade"), "ping")?;

    let mut ledger = LocalLedger::new();
    let (tx, mut rx) = mpsc::channel(8);

    check_signal(dir.path(), &cascade(), &mut ledger, &tx).await;
    assert!(rx.try_recv().is_ok());

    // The redundant fallback-scan pass over the same write.
    check_signal(dir.path(), &cascade(), &mut ledger, &tx).await;
    check_signal(dir.path(), &cascade(), &mut ledger, &tx).await;
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

    Ok(())
}

#[tokio::test]
async fn empty_marker_dispatches_with_empty_context() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("notify-cascade"), "")?;

    let mut ledger = LocalLedger::new();
    let (tx, mut rx) = mpsc::channel(8);

    check_signal(dir.path(), &cascade(), &mut ledger, &tx).await;

    let event = rx.try_recv()?;
    assert_eq!(event.context, "");

    Ok(())
}

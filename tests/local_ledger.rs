use std::error::Error;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use relaybell::watch::LocalLedger;

type TestResult = Result<(), Box<dyn Error>>;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn first_observation_is_dispatched() -> TestResult {
    let mut ledger = LocalLedger::new();

    assert!(ledger.mark_if_newer("notify-cascade", at(100)));
    assert_eq!(ledger.last_handled("notify-cascade"), Some(at(100)));

    Ok(())
}

#[test]
fn mtime_tie_is_suppressed() -> TestResult {
    let mut ledger = LocalLedger::new();

    assert!(ledger.mark_if_newer("notify-cascade", at(100)));
    assert!(!ledger.mark_if_newer("notify-cascade", at(100)));
    assert_eq!(ledger.last_handled("notify-cascade"), Some(at(100)));

    Ok(())
}

#[test]
fn mtime_regression_is_suppressed() -> TestResult {
    let mut ledger = LocalLedger::new();

    assert!(ledger.mark_if_newer("notify-cascade", at(100)));
    assert!(!ledger.mark_if_newer("notify-cascade", at(50)));
    // The ledger keeps the newest handled time, not the regressed one.
    assert_eq!(ledger.last_handled("notify-cascade"), Some(at(100)));

    Ok(())
}

#[test]
fn newer_mtime_is_dispatched_again() -> TestResult {
    let mut ledger = LocalLedger::new();

    assert!(ledger.mark_if_newer("notify-cascade", at(100)));
    assert!(ledger.mark_if_newer("notify-cascade", at(101)));
    assert_eq!(ledger.last_handled("notify-cascade"), Some(at(101)));

    Ok(())
}

#[test]
fn signals_are_tracked_independently() -> TestResult {
    let mut ledger = LocalLedger::new();

    assert!(ledger.mark_if_newer("notify-cascade", at(100)));
    assert!(ledger.mark_if_newer("notify-replit", at(100)));
    assert!(!ledger.mark_if_newer("notify-cascade", at(100)));
    assert!(ledger.mark_if_newer("notify-replit", at(200)));

    Ok(())
}

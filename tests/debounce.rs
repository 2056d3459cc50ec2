use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use relaybell::watch::DebounceMap;

#[tokio::test]
async fn burst_of_schedules_produces_one_check() {
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let mut debounce = DebounceMap::new(Duration::from_millis(100), tx);

    // Three rapid events inside the quiet window.
    debounce.schedule("notify-cascade");
    tokio::time::sleep(Duration::from_millis(10)).await;
    debounce.schedule("notify-cascade");
    tokio::time::sleep(Duration::from_millis(10)).await;
    debounce.schedule("notify-cascade");

    let first = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("debounced check should arrive")
        .expect("channel open");
    assert_eq!(first, "notify-cascade");

    // The burst collapsed; nothing else is pending.
    assert!(
        timeout(Duration::from_millis(300), rx.recv()).await.is_err(),
        "only one check expected for a coalesced burst"
    );
}

#[tokio::test]
async fn distinct_signals_debounce_independently() {
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let mut debounce = DebounceMap::new(Duration::from_millis(50), tx);

    debounce.schedule("notify-cascade");
    debounce.schedule("notify-replit");

    let mut seen = vec![
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("first check")
            .expect("channel open"),
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("second check")
            .expect("channel open"),
    ];
    seen.sort();

    assert_eq!(seen, vec!["notify-cascade", "notify-replit"]);
}

#[tokio::test]
async fn rescheduling_pushes_the_timer_back() {
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let mut debounce = DebounceMap::new(Duration::from_millis(150), tx);

    debounce.schedule("notify-cascade");
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Still inside the window: the original timer must be cancelled.
    debounce.schedule("notify-cascade");
    assert!(
        timeout(Duration::from_millis(100), rx.recv()).await.is_err(),
        "rescheduled timer should not fire on the original deadline"
    );

    let name = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("rescheduled check should arrive")
        .expect("channel open");
    assert_eq!(name, "notify-cascade");
}

mod common;

use std::time::Duration;

use comic_view::events::AutoAdvance;
use comic_view::tasks::auto_advance;
use common::{fill, navigator};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

const PERIOD: Duration = Duration::from_secs(4);
const SLACK: Duration = Duration::from_millis(100);

fn ten_pages() -> Vec<String> {
    (0..10).map(|i| format!("p{i:02}.png")).collect()
}

#[tokio::test(start_paused = true)]
async fn advances_once_per_tick_only_while_armed() {
    let (navigator, store, _screen) = navigator();
    let pages = ten_pages();
    fill(&store, &pages.iter().map(String::as_str).collect::<Vec<_>>());
    let (control_tx, control_rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(auto_advance::run(
        control_rx,
        navigator,
        PERIOD,
        cancel.clone(),
    ));

    sleep(PERIOD * 2 + SLACK).await;
    assert_eq!(store.cursor(), 0, "disarmed timer must not move the cursor");

    control_tx.send(AutoAdvance::Armed).await.unwrap();
    sleep(PERIOD + SLACK).await;
    assert_eq!(store.cursor(), 1);

    sleep(PERIOD * 2).await;
    assert_eq!(store.cursor(), 3);

    control_tx.send(AutoAdvance::Disarmed).await.unwrap();
    sleep(PERIOD * 3).await;
    assert_eq!(store.cursor(), 3, "no steps after disarming");

    cancel.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn repeated_arm_does_not_double_the_rate() {
    let (navigator, store, _screen) = navigator();
    let pages = ten_pages();
    fill(&store, &pages.iter().map(String::as_str).collect::<Vec<_>>());
    let (control_tx, control_rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(auto_advance::run(
        control_rx,
        navigator,
        PERIOD,
        cancel.clone(),
    ));

    control_tx.send(AutoAdvance::Armed).await.unwrap();
    control_tx.send(AutoAdvance::Armed).await.unwrap();
    sleep(PERIOD + SLACK).await;
    assert_eq!(store.cursor(), 1);

    cancel.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn armed_timer_stops_one_past_the_last_page() {
    let (navigator, store, screen) = navigator();
    fill(&store, &["a.png", "b.png"]);
    let (control_tx, control_rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(auto_advance::run(
        control_rx,
        navigator,
        PERIOD,
        cancel.clone(),
    ));

    control_tx.send(AutoAdvance::Armed).await.unwrap();
    sleep(PERIOD * 5 + SLACK).await;

    assert_eq!(store.cursor(), 2);
    assert_eq!(screen.pages().len(), 1, "only b.png is ever rendered");

    cancel.cancel();
    handle.await.unwrap().unwrap();
}

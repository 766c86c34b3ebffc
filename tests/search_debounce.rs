use std::sync::{Arc, Mutex};
use std::time::Duration;

use catalog_pricing_engine::search::SearchDebouncer;

type Emitted = Arc<Mutex<Vec<String>>>;

fn spawn_capturing(quiet_period: Duration) -> (Emitted, SearchDebouncer) {
    let emitted: Emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = emitted.clone();
    let debouncer =
        SearchDebouncer::spawn(quiet_period, move |q| sink.lock().unwrap().push(q));
    (emitted, debouncer)
}

#[tokio::test]
async fn a_burst_of_keystrokes_emits_only_the_latest_query() {
    let (emitted, debouncer) = spawn_capturing(Duration::from_millis(50));

    debouncer.input("d");
    debouncer.input("de");
    debouncer.input("dell");
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(*emitted.lock().unwrap(), vec!["dell".to_string()]);
    debouncer.shutdown().await;
}

#[tokio::test]
async fn separate_bursts_each_emit() {
    let (emitted, debouncer) = spawn_capturing(Duration::from_millis(50));

    debouncer.input("dell");
    tokio::time::sleep(Duration::from_millis(150)).await;
    debouncer.input("hp victus");
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(
        *emitted.lock().unwrap(),
        vec!["dell".to_string(), "hp victus".to_string()]
    );
    debouncer.shutdown().await;
}

#[tokio::test]
async fn blank_input_clears_without_waiting() {
    let (emitted, debouncer) = spawn_capturing(Duration::from_millis(50));

    debouncer.input("dell");
    debouncer.input("   ");
    tokio::time::sleep(Duration::from_millis(200)).await;

    // the superseded query never fires; the clear does
    assert_eq!(*emitted.lock().unwrap(), vec![String::new()]);
    debouncer.shutdown().await;
}

#[tokio::test]
async fn shutdown_flushes_the_pending_query() {
    let (emitted, debouncer) = spawn_capturing(Duration::from_millis(10_000));

    debouncer.input("lenovo ");
    debouncer.shutdown().await;

    assert_eq!(*emitted.lock().unwrap(), vec!["lenovo".to_string()]);
}

#[tokio::test]
async fn emitted_queries_are_trimmed() {
    let (emitted, debouncer) = spawn_capturing(Duration::from_millis(50));

    debouncer.input("  thinkpad  ");
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(*emitted.lock().unwrap(), vec!["thinkpad".to_string()]);
    debouncer.shutdown().await;
}

//! Debounced free-text search coordination.
//!
//! Local filtering needs no debouncing, but search against the remote catalog
//! does: rapid keystrokes are coalesced and only the latest query is emitted
//! once the input goes quiet, so at most one upstream fetch is issued per
//! burst. The fetch itself is owned by the caller.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};

pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Spawns the coordinator task. `on_query` fires with the latest query of
    /// a burst after `quiet_period` without new input; blank input fires
    /// immediately with an empty query, clearing stale results.
    pub fn spawn<F>(quiet_period: Duration, mut on_query: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = tokio::spawn(async move {
            while let Some(input) = rx.recv().await {
                if input.trim().is_empty() {
                    on_query(String::new());
                    continue;
                }
                let mut latest = input;
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(next) if next.trim().is_empty() => {
                                on_query(String::new());
                                break;
                            }
                            Some(next) => latest = next,
                            None => {
                                // channel closed: flush what we have
                                on_query(latest.trim().to_string());
                                return;
                            }
                        },
                        _ = time::sleep(quiet_period) => {
                            on_query(latest.trim().to_string());
                            break;
                        }
                    }
                }
            }
        });
        Self { tx, handle }
    }

    /// Feeds one keystroke's worth of input. Never blocks.
    pub fn input(&self, query: impl Into<String>) {
        let _ = self.tx.send(query.into());
    }

    /// Closes the input side and waits for the task to flush and exit.
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}

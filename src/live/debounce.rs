//! Input debouncing.
//!
//! Values pushed within the quiet window of each other are coalesced; only
//! the latest one reaches the callback, once input has settled.

use futures_util::future::BoxFuture;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Coalesces rapid changes into one callback per quiet window
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Spawn the debouncing task. Must be called inside a tokio runtime.
    pub fn spawn<F>(window: Duration, mut on_settle: F) -> Self
    where
        F: FnMut(T) -> BoxFuture<'static, ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                let mut coalesced = 0usize;
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => {
                                latest = value;
                                coalesced += 1;
                            }
                            None => break,
                        },
                        _ = tokio::time::sleep(window) => break,
                    }
                }
                tracing::trace!(coalesced, "Input settled");
                on_settle(latest).await;
            }
        });

        Self { tx, task }
    }

    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::debug!("Debouncer task has stopped; dropping change");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::sync::{Arc, Mutex};

    fn recording(window: Duration) -> (Debouncer<u32>, Arc<Mutex<Vec<u32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::spawn(window, move |value| {
            let sink = Arc::clone(&sink);
            async move { sink.lock().unwrap().push(value) }.boxed()
        });
        (debouncer, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced_into_latest_value() {
        let (debouncer, seen) = recording(Duration::from_millis(300));

        debouncer.push(1);
        debouncer.push(12);
        debouncer.push(120);
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(*seen.lock().unwrap(), vec![120]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_change_restarts_the_window() {
        let (debouncer, seen) = recording(Duration::from_millis(300));

        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.push(2);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (debouncer, seen) = recording(Duration::from_millis(300));

        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.push(2);
        debouncer.push(3);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }
}

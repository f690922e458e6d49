//! Debounced commit lane.
//!
//! [`DebouncedSink`] collapses rapid successive values into a single
//! delayed commit: every [`push`](DebouncedSink::push) re-arms a
//! single-shot timer, and only the value present when the timer fires is
//! committed. Closing the sink cancels any pending timer so a value that
//! never settled is never written.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A single debounce lane: a value source feeding a commit function
/// through a re-armable single-shot timer.
pub struct DebouncedSink<T: Send + 'static> {
    tx: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
    // Option so close() can take the handle out from under the Drop impl.
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> DebouncedSink<T> {
    /// Spawn a debounce lane with the given settle delay.
    ///
    /// `commit` is invoked with the most recent pushed value once no new
    /// value has arrived for `delay`. Commits run one at a time on the
    /// lane's own task; values pushed while a commit is in flight re-arm
    /// the timer as usual.
    pub fn new<F, Fut>(delay: Duration, mut commit: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let cancel = CancellationToken::new();
        let lane_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                tokio::select! {
                    // Teardown: drop any pending value without committing.
                    _ = lane_cancel.cancelled() => return,

                    // A new value restarts the timer (the select is
                    // re-entered, creating a fresh sleep below).
                    value = rx.recv() => {
                        match value {
                            Some(value) => pending = Some(value),
                            None => return,
                        }
                    }

                    // The timer only runs while a value is pending.
                    _ = tokio::time::sleep(delay), if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            commit(value).await;
                        }
                    }
                }
            }
        });

        Self {
            tx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Feed a new value into the lane, re-arming the timer. Any value
    /// still waiting on the timer is replaced.
    pub fn push(&self, value: T) {
        // Send fails only after close(); a pushed value after teardown is
        // intentionally discarded.
        let _ = self.tx.send(value);
    }

    /// Tear the lane down, cancelling any pending (not-yet-fired) commit,
    /// and wait for the lane task to exit.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl<T: Send + 'static> Drop for DebouncedSink<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

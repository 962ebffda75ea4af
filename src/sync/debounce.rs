//! Timer-based coalescing of rapid input events.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Coalesces rapid calls into a single delayed action.
///
/// Each [`call`] cancels the previously scheduled action and schedules the
/// new one after the configured delay, so only the last of a burst of input
/// events produces an outbound query. [`cancel`] aborts any pending action;
/// dropping the debouncer cancels implicitly, covering component teardown.
///
/// [`call`]: Debouncer::call
/// [`cancel`]: Debouncer::cancel
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer with the given coalescing delay.
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Schedules `action` to run after the delay, superseding any action
    /// scheduled earlier.
    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Aborts the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_calls_fires_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for _ in 0..5 {
            let fired = Arc::clone(&fired);
            debouncer.call(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        {
            let fired = Arc::clone(&fired);
            debouncer.call(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_action() {
        let fired = Arc::new(AtomicUsize::new(0));

        {
            let mut debouncer = Debouncer::new(Duration::from_millis(300));
            let fired = Arc::clone(&fired);
            debouncer.call(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_fire() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for _ in 0..2 {
            let fired = Arc::clone(&fired);
            debouncer.call(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(600)).await;
        }

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}

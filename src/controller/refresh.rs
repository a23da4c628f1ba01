use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Periodic task on the current `LocalSet`; aborted when dropped.
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
    period: Duration,
}

impl RefreshTask {
    /// Calls `tick` every `period`, starting one period from now.
    ///
    /// The loop ends when `tick` returns `None`. Must be called from within a
    /// `LocalSet`.
    pub fn start<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Option<Fut> + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let handle = tokio::task::spawn_local(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(run) = tick() else {
                    debug!("Refresh owner dropped; stopping");
                    break;
                };
                run.await;
            }
        });
        debug!(period_ms = period.as_millis(), "Refresh task started");
        Self { handle, period }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Refresh task stopped");
    }
}

//! Background task that advances the rolling sensor window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::store::DashboardStore;

// ---

/// Handle to a running ticker. Dropping it does not stop the task; call
/// [`Ticker::shutdown`].
pub struct Ticker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Spawn a task that calls [`DashboardStore::tick`] every `period`.
///
/// The first tick happens one full period after spawning. The task stops
/// when `cancel` is cancelled.
pub fn spawn_ticker(store: Arc<DashboardStore>, period: Duration, cancel: CancellationToken) -> Ticker {
    // ---
    info!(period_ms = period.as_millis() as u64, "starting sensor ticker");
    let handle = tokio::spawn(tick_task(store, period, cancel.clone()));
    Ticker { cancel, handle }
}

async fn tick_task(store: Arc<DashboardStore>, period: Duration, cancel: CancellationToken) {
    // ---
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => store.tick(),
        }
    }

    debug!("sensor ticker stopped");
}

impl Ticker {
    /// Cancel the task and wait for it to finish.
    pub async fn shutdown(self) {
        // ---
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "sensor ticker task ended abnormally");
        }
    }
}

//! Periodic Refresh Task
//!
//! Background task that re-runs a full refresh on a wall-clock interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::InsightsService;

/// Spawns a background task calling [`InsightsService::refresh_all`] every `interval`.
///
/// The first refresh happens one interval after spawning. A refresh in
/// flight is never cancelled by a manual one; both simply complete.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_refresh_task(service.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_refresh_task(service: Arc<InsightsService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting refresh task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let outcome = service.refresh_all().await;
            debug!(
                "Periodic refresh finished: {} failures",
                outcome.failures.len()
            );
        }
    })
}

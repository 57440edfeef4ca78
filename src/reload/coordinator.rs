//! Reload scheduling and snapshot publication.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::observability::metrics;
use crate::redirects::loader::{load_redirects, RedirectSources};
use crate::redirects::RedirectTable;
use crate::reload::ReloadTrigger;

/// Interval between trigger polls. Bounds reload latency without
/// busy-spinning.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the mutable "current snapshot" reference.
///
/// Idle between poll ticks. On a raised trigger it clears the trigger
/// first (a second trigger during the rebuild is coalesced), rebuilds the
/// table from the startup sources (only file contents may have changed)
/// and publishes the result in one reference store. Requests already
/// holding the previous snapshot are never disturbed.
pub struct ReloadCoordinator {
    table: Arc<ArcSwap<RedirectTable>>,
    trigger: Arc<ReloadTrigger>,
    sources: Arc<RedirectSources>,
}

impl ReloadCoordinator {
    pub fn new(
        table: Arc<ArcSwap<RedirectTable>>,
        trigger: Arc<ReloadTrigger>,
        sources: Arc<RedirectSources>,
    ) -> Self {
        Self {
            table,
            trigger,
            sources,
        }
    }

    /// Run the poll loop until shutdown.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut tick = tokio::time::interval(POLL_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if self.trigger.take() {
                        self.reload().await;
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("reload coordinator stopping");
                    break;
                }
            }
        }
    }

    /// Rebuild and publish a new snapshot. File I/O runs on the blocking
    /// pool so a slow or large redirects file never delays request
    /// handling.
    async fn reload(&self) {
        let sources = self.sources.clone();
        let table = match tokio::task::spawn_blocking(move || load_redirects(&sources)).await {
            Ok(table) => table,
            Err(error) => {
                tracing::error!(%error, "reload task failed, keeping current table");
                return;
            }
        };

        if table.is_empty() {
            tracing::warn!("reloaded redirect table has no entries");
        }
        tracing::info!(entries = table.len(), "publishing reloaded redirect table");
        metrics::record_table_size(table.len());
        self.table.store(Arc::new(table));
    }
}

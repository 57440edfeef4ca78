//! Shutdown coordination.

use std::time::Duration;

use tokio::sync::broadcast;

/// Coordinator for graceful termination.
///
/// Long-running tasks subscribe; when the channel fires the serve loop
/// stops accepting new connections and in-flight requests finish.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Request graceful termination after `secs` seconds.
///
/// Spawned only when the auto-shutdown timer is configured; intended for
/// testing deployments.
pub async fn shutdown_after(shutdown: Shutdown, secs: u64) {
    tracing::debug!(secs, "server will shut down after timer");
    tokio::time::sleep(Duration::from_secs(secs)).await;
    tracing::info!(secs, "auto-shutdown timer elapsed, stopping server");
    shutdown.trigger();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_all_subscribers() {
        let shutdown = Shutdown::new();
        let mut first = shutdown.subscribe();
        let mut second = shutdown.subscribe();

        shutdown.trigger();
        assert!(first.recv().await.is_ok());
        assert!(second.recv().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_triggers_after_deadline() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        tokio::spawn(shutdown_after(shutdown.clone(), 30));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(rx.try_recv().is_ok());
    }
}

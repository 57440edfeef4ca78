//! OS signal handling.
//!
//! The reload signal adapter's only job is raising the shared trigger; all
//! reload logic lives in the coordinator. The signal identity is
//! platform-dependent: SIGUSR1 on Unix, Ctrl-Break (SIGBREAK) on Windows.

use std::sync::Arc;

use crate::reload::ReloadTrigger;

/// Human-readable name of the reload signal on this platform.
#[cfg(unix)]
pub const RELOAD_SIGNAL_NAME: &str = "SIGUSR1";
#[cfg(windows)]
pub const RELOAD_SIGNAL_NAME: &str = "SIGBREAK";

/// Install the reload signal listener.
///
/// Installation failure disables reload-by-signal but never stops the
/// server; reload over HTTP (when configured) still works.
#[cfg(unix)]
pub fn spawn_reload_listener(trigger: Arc<ReloadTrigger>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut stream = match signal(SignalKind::user_defined1()) {
        Ok(stream) => stream,
        Err(error) => {
            tracing::error!(signal = RELOAD_SIGNAL_NAME, %error, "cannot install reload signal handler");
            return;
        }
    };
    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            tracing::info!(signal = RELOAD_SIGNAL_NAME, "reload requested by process signal");
            trigger.raise();
        }
    });
}

#[cfg(windows)]
pub fn spawn_reload_listener(trigger: Arc<ReloadTrigger>) {
    let mut stream = match tokio::signal::windows::ctrl_break() {
        Ok(stream) => stream,
        Err(error) => {
            tracing::error!(signal = RELOAD_SIGNAL_NAME, %error, "cannot install reload signal handler");
            return;
        }
    };
    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            tracing::info!(signal = RELOAD_SIGNAL_NAME, "reload requested by process signal");
            trigger.raise();
        }
    });
}

//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum router around the dispatch handler
//! - Attach identity headers and request tracing to every response
//! - Spawn the reload coordinator and the reload signal listener
//! - Serve with graceful shutdown, letting in-flight requests finish

use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Local, Timelike};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::handlers::dispatch;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::redirects::loader::load_redirects;
use crate::redirects::{RedirectCounter, RedirectSources, RedirectTable};
use crate::reload::{ReloadCoordinator, ReloadTrigger};

/// Identity headers carried on every response.
pub static HEADER_SERVER_HOST: HeaderName = HeaderName::from_static("redirect-server-host");
pub static HEADER_SERVER_VERSION: HeaderName = HeaderName::from_static("redirect-server-version");

/// Read-only facts about this server process, rendered on the status page.
#[derive(Debug)]
pub struct ServerIdentity {
    pub hostname: String,
    pub version: &'static str,
    pub pid: u32,
    pub started_at: DateTime<Local>,
    pub started_instant: Instant,
    pub listen_addr: SocketAddr,
    pub command_line: String,
}

impl ServerIdentity {
    fn new(listen_addr: SocketAddr) -> Self {
        let now = Local::now();
        Self {
            hostname: hostname::get()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "localhost".to_string()),
            version: env!("CARGO_PKG_VERSION"),
            pid: process::id(),
            started_at: now.with_nanosecond(0).unwrap_or(now),
            started_instant: Instant::now(),
            listen_addr,
            command_line: std::env::args().collect::<Vec<_>>().join(" "),
        }
    }
}

/// Dispatch-time settings derived from the validated config.
#[derive(Debug)]
pub struct DispatchOptions {
    pub status_path: String,
    pub reload_path: Option<String>,
    pub redirect_code: StatusCode,
}

/// Shared state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    /// Current table snapshot; swapped whole on reload.
    pub table: Arc<ArcSwap<RedirectTable>>,
    pub counter: RedirectCounter,
    pub trigger: Arc<ReloadTrigger>,
    pub identity: Arc<ServerIdentity>,
    pub options: Arc<DispatchOptions>,
    pub sources: Arc<RedirectSources>,
}

/// HTTP server for the redirect table.
pub struct HttpServer {
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new server from a validated configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Run the server on an already-bound listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;

        let sources = Arc::new(RedirectSources::from_config(&self.config));
        let table = load_redirects(&sources);
        if table.is_empty() {
            tracing::warn!("there are no redirect entries");
        }
        tracing::info!(entries = table.len(), "initial redirect table loaded");
        metrics::record_table_size(table.len());

        let redirect_code = StatusCode::from_u16(self.config.redirects.redirect_code)
            .unwrap_or(StatusCode::PERMANENT_REDIRECT);

        let table = Arc::new(ArcSwap::from_pointee(table));
        let trigger = Arc::new(ReloadTrigger::new());
        let identity = Arc::new(ServerIdentity::new(addr));

        signals::spawn_reload_listener(trigger.clone());

        let coordinator = ReloadCoordinator::new(table.clone(), trigger.clone(), sources.clone());
        tokio::spawn(coordinator.run(shutdown.resubscribe()));

        let state = AppState {
            table,
            counter: RedirectCounter::new(),
            trigger,
            identity: identity.clone(),
            options: Arc::new(DispatchOptions {
                status_path: self.config.paths.status_path.clone(),
                reload_path: self.config.paths.reload_path.clone(),
                redirect_code,
            }),
            sources,
        };

        let app = build_router(state);

        tracing::info!(
            address = %addr,
            pid = identity.pid,
            redirect_code = redirect_code.as_u16(),
            "serving redirects"
        );

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the axum router: one GET dispatcher for every path, identity
/// headers stamped onto every response.
pub(crate) fn build_router(state: AppState) -> Router {
    let host = HeaderValue::from_str(&state.identity.hostname)
        .unwrap_or_else(|_| HeaderValue::from_static("localhost"));
    let version = HeaderValue::from_static(env!("CARGO_PKG_VERSION"));

    Router::new()
        .route("/", get(dispatch))
        .route("/{*path}", get(dispatch))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            HEADER_SERVER_HOST.clone(),
            host,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HEADER_SERVER_VERSION.clone(),
            version,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Resolve when either Ctrl-C arrives or the shutdown broadcast fires.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };
    tokio::select! {
        _ = ctrl_c => tracing::info!("interrupt received, shutting down"),
        _ = shutdown.recv() => tracing::info!("shutdown requested, draining connections"),
    }
}

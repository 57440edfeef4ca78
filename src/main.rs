//! The "Go To" HTTP redirect server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!     GET /path          │  ┌──────────┐      ┌───────────────────────┐  │
//!     ──────────────────▶│  │  http    │─────▶│ handlers (dispatch)   │  │
//!                        │  │  server  │      │ status│reload│favicon │  │
//!                        │  └──────────┘      └───────────┬───────────┘  │
//!                        │                                ▼              │
//!     redirect response  │                    ┌───────────────────────┐  │
//!     ◀──────────────────│────────────────────│ redirect table        │  │
//!                        │                    │ snapshot (Arc swap)   │  │
//!                        │                    └───────────▲───────────┘  │
//!                        │                                │ publish      │
//!                        │  SIGUSR1 / GET reload-path     │              │
//!                        │  ──────────▶ trigger ──▶ reload coordinator  │
//!                        │                    (1s poll, re-reads files)  │
//!                        └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use goto_redirect::config::{validate_config, Cli};
use goto_redirect::lifecycle::{shutdown_after, Shutdown};
use goto_redirect::observability::{logging, metrics};
use goto_redirect::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.into_config()?;

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("ERROR: {error}");
        }
        std::process::exit(1);
    }

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        redirect_code = config.redirects.redirect_code,
        "goto-redirect starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(error) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                %error,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;

    let shutdown = Shutdown::new();
    if config.shutdown_after_secs > 0 {
        tokio::spawn(shutdown_after(shutdown.clone(), config.shutdown_after_secs));
    }

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

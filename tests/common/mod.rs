//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;

use goto_redirect::config::{FromTo, ServerConfig};
use goto_redirect::lifecycle::Shutdown;
use goto_redirect::HttpServer;

/// Inline redirect pair.
#[allow(dead_code)]
pub fn from_to(from: &str, to: &str) -> FromTo {
    FromTo {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Write a redirects file (one pre-delimited line per element) into `dir`.
#[allow(dead_code)]
pub fn write_redirects_file(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Spawn a server on an ephemeral port. Returns its address and the
/// shutdown handle keeping it alive.
pub async fn spawn_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = HttpServer::new(config).run(listener, receiver).await;
    });

    // give startup a beat before the first request
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

/// Client that never follows redirects so tests can assert on them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

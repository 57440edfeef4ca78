//! The "Go To" HTTP redirect server library.
//!
//! Answers HTTP GET requests with redirect responses looked up in a table
//! of path → URL mappings. The table is loaded from inline pairs and
//! delimited redirect files at startup and can be reloaded at runtime
//! (process signal or HTTP request) without dropping connections: reloads
//! build a brand-new snapshot and publish it with one atomic reference
//! swap while in-flight requests finish on the snapshot they started with.

// Core subsystems
pub mod config;
pub mod http;
pub mod redirects;
pub mod reload;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

/// Program name used in logs and on the status page.
pub const PROGRAM_NAME: &str = "goto-redirect";

//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; level and destination come from config
//! - Metrics are a Prometheus scrape endpoint, disabled by default
//! - The redirect counter shown on the status page is part of the serving
//!   surface, not the ops surface, and lives in `redirects::counter`

pub mod logging;
pub mod metrics;

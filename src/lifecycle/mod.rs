//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl-C / --shutdown timer
//!     → shutdown.rs (broadcast) → serve loop stops accepting, drains
//!
//! SIGUSR1 (Unix) / Ctrl-Break (Windows)
//!     → signals.rs → reload trigger (handled by the coordinator, never here)
//! ```
//!
//! # Design Decisions
//! - Signal adapters are narrow: they only raise flags or broadcasts
//! - In-flight requests always finish; shutdown stops the accept loop

pub mod shutdown;
pub mod signals;

pub use shutdown::{shutdown_after, Shutdown};

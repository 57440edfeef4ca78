//! Live reload subsystem.
//!
//! # Data Flow
//! ```text
//! SIGUSR1 / Ctrl-Break ──┐
//!                        ├─ trigger.rs (shared flag, atomic test-and-clear)
//! GET <reload_path> ─────┘
//!     → coordinator.rs (1s poll tick)
//!     → redirects::loader (re-read files, off the request path)
//!     → ArcSwap::store (atomic snapshot publication)
//! ```
//!
//! # Design Decisions
//! - Both producers set the same flag; a trigger raised during a rebuild is
//!   coalesced, not queued (reload is idempotent given the same sources)
//! - Publication is a single reference swap; in-flight requests finish on
//!   the snapshot they started with

pub mod coordinator;
pub mod trigger;

pub use coordinator::ReloadCoordinator;
pub use trigger::ReloadTrigger;

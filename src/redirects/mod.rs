//! Redirect table subsystem.
//!
//! # Data Flow
//! ```text
//! redirect files + inline pairs
//!     → loader.rs (parse rows, merge; inline wins)
//!     → RedirectTable (immutable snapshot, entry.rs)
//!     → shared via Arc<ArcSwap<..>> with request handlers
//!
//! successful redirect
//!     → counter.rs (concurrent per-pair tally, status page only)
//! ```
//!
//! # Design Decisions
//! - A snapshot is never mutated after publication; a reload builds a new one
//! - Row-level and file-level load errors are isolated, never fatal
//! - BTreeMap storage so the status page lists keys in lexicographic order

pub mod counter;
pub mod entry;
pub mod loader;

pub use counter::RedirectCounter;
pub use entry::{RedirectEntry, RedirectTable};
pub use loader::{load_redirects, RedirectSources};

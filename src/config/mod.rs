//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (clap) ──┐
//!                    ├─ cli.rs (merge; flags win)
//! TOML file ─────────┘
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (read-only for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Redirect sources (inline pairs, file list, field delimiter) are fixed
//!   at startup; a reload re-reads file contents, never the configuration
//! - All fields have defaults so a minimal invocation works
//! - Syntactic checks live in serde/clap, semantic checks in validation.rs

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use schema::{
    FromTo, ListenerConfig, ObservabilityConfig, PathsConfig, RedirectsConfig, ServerConfig,
};
pub use validation::{validate_config, ValidationError};

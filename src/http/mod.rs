//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, shared state, identity headers)
//!     → handlers.rs (dispatch: status | reload | favicon | table lookup)
//!     → status.rs (diagnostic HTML) or redirect / 404 / 500 response
//! ```

pub mod handlers;
pub mod server;
pub mod status;

pub use server::{AppState, HttpServer, ServerIdentity};

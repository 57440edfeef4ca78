//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML config
//! file; the same structs are the merge target for command-line flags.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default status page path.
pub const STATUS_PATH_DEFAULT: &str = "/status";

/// Default field delimiter within redirect files (horizontal tab).
pub const FIELD_DELIMITER_DEFAULT: &str = "\t";

/// Default HTTP status code for successful redirects (Permanent Redirect).
pub const REDIRECT_CODE_DEFAULT: u16 = 308;

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (interface, port).
    pub listener: ListenerConfig,

    /// Redirect sources and response behavior.
    pub redirects: RedirectsConfig,

    /// Reserved request paths (status page, optional reload).
    pub paths: PathsConfig,

    /// Shut the server down after this many seconds; 0 disables the timer.
    pub shutdown_after_secs: u64,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// IP interface to listen on.
    pub ip: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 80,
        }
    }
}

impl ListenerConfig {
    /// The `ip:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

/// One inline redirect mapping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FromTo {
    /// URI path of the originating request.
    pub from: String,

    /// Destination placed into the `Location` header.
    pub to: String,
}

/// Redirect sources and response behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Inline redirect pairs; always override file-sourced entries.
    pub from_to: Vec<FromTo>,

    /// Redirect files, one delimited entry per line, processed in order.
    pub files: Vec<PathBuf>,

    /// Field delimiter string within redirect files.
    pub field_delimiter: String,

    /// HTTP status code returned for successful redirects.
    pub redirect_code: u16,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            from_to: Vec::new(),
            files: Vec::new(),
            field_delimiter: FIELD_DELIMITER_DEFAULT.to_string(),
            redirect_code: REDIRECT_CODE_DEFAULT,
        }
    }
}

/// Reserved request paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Status page path.
    pub status_path: String,

    /// Optional reload-request path. Reload by process signal is always
    /// available; this path is an additional, opt-in trigger.
    pub reload_path: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            status_path: STATUS_PATH_DEFAULT.to_string(),
            reload_path: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log destination file; stderr when unset.
    pub log_file: Option<PathBuf>,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

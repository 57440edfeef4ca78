//! Command-line interface.
//!
//! Flags mirror the configuration schema; values from an optional TOML
//! config file form the base and flags override them.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{FromTo, ServerConfig};

const AFTER_HELP: &str = "\
About Redirect Entries:

  Entries found in --redirects file(s) and entries passed via --from-to are
  combined. Entries passed via --from-to override any matching \"from path\"
  entry found in redirects files.

  A redirects file entry has four fields separated by the field delimiter:
  \"from path\", \"to URL\", \"added by user\", \"added on datetime\". For example,

    /hr\thttp://human-resources.mycorp.local/login\tbob\t2019-09-07 12:00:00

  The last two fields are record-keeping only and never affect routing.
  A \"from path\" should have a leading \"/\" as it is matched against the
  URI path of the originating request.

About Reloads:

  Sending the reload signal (SIGUSR1 on Unix, Ctrl-Break on Windows) to the
  running process re-reads any files passed via --redirects without
  disrupting the server. A reload may also be requested over HTTP when
  --reload-path is set. If security or stability is a concern, only allow
  reloads via process signal.";

/// The "Go To" HTTP redirect server! For sharing custom shortened HTTP
/// URLs on your network.
///
/// Load the server with redirects of "from path" and "to URL" and let it
/// run indefinitely. Reload the running server by signaling the process.
#[derive(Debug, Parser)]
#[command(name = crate::PROGRAM_NAME, version, about, after_help = AFTER_HELP)]
pub struct Cli {
    /// A single redirection of "from path" and "to URL" fields. May be
    /// passed multiple times.
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], action = clap::ArgAction::Append)]
    from_to: Vec<String>,

    /// File of redirection entries, one per line; four fields separated by
    /// the field delimiter: "from path", "to URL", "added by user",
    /// "added on datetime". May be passed multiple times.
    #[arg(long = "redirects", value_name = "FILE", action = clap::ArgAction::Append)]
    redirects_files: Vec<PathBuf>,

    /// IP interface to listen on.
    #[arg(short, long)]
    ip: Option<String>,

    /// TCP port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the status page path. This is the page that dumps
    /// information about the process and the loaded redirects.
    #[arg(long, value_name = "PATH")]
    status_path: Option<String>,

    /// Allow reloads by HTTP GET request to this path. Reload by process
    /// signal is always available. Off by default.
    #[arg(long, value_name = "PATH")]
    reload_path: Option<String>,

    /// Override the HTTP status code returned for successful redirects,
    /// e.g. 307 for Temporary Redirect.
    #[arg(long, value_name = "CODE")]
    redirect_code: Option<u16>,

    /// Field delimiter string for --redirects files (defaults to a tab).
    #[arg(long, value_name = "DELIMITER")]
    field_delimiter: Option<String>,

    /// Shut the server down after the passed seconds. Intended for testing.
    #[arg(long, value_name = "SECS")]
    shutdown: Option<u64>,

    /// Log to a file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Set logging level to debug.
    #[arg(long)]
    verbose: bool,

    /// Load settings from a TOML config file; flags override file values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective configuration: the optional TOML file as the
    /// base, command-line flags merged on top.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        for pair in self.from_to.chunks_exact(2) {
            config.redirects.from_to.push(FromTo {
                from: pair[0].clone(),
                to: pair[1].clone(),
            });
        }
        config.redirects.files.extend(self.redirects_files);

        if let Some(ip) = self.ip {
            config.listener.ip = ip;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(status_path) = self.status_path {
            config.paths.status_path = status_path;
        }
        if let Some(reload_path) = self.reload_path {
            config.paths.reload_path = Some(reload_path);
        }
        if let Some(redirect_code) = self.redirect_code {
            config.redirects.redirect_code = redirect_code;
        }
        if let Some(field_delimiter) = self.field_delimiter {
            config.redirects.field_delimiter = field_delimiter;
        }
        if let Some(shutdown) = self.shutdown {
            config.shutdown_after_secs = shutdown;
        }
        if let Some(log) = self.log {
            config.observability.log_file = Some(log);
        }
        if self.verbose {
            config.observability.log_level = "debug".to_string();
        }

        Ok(config)
    }
}

//! Semantic validation of the merged configuration.
//!
//! Everything here is fatal at startup: the process refuses to serve with
//! a configuration that fails any of these checks.

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no redirect information was passed (from-to pairs or redirects files)")]
    NoRedirectSources,

    #[error("status path and reload path must be different paths ({0})")]
    PathCollision(String),

    #[error("invalid HTTP redirect status code {0}")]
    InvalidRedirectCode(u16),

    #[error("field delimiter must not be empty")]
    EmptyFieldDelimiter,

    #[error("invalid listen IP address {0}")]
    InvalidListenIp(String),
}

/// Check the merged configuration; collects every violation rather than
/// stopping at the first.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.redirects.from_to.is_empty() && config.redirects.files.is_empty() {
        errors.push(ValidationError::NoRedirectSources);
    }

    if let Some(reload_path) = &config.paths.reload_path {
        if reload_path == &config.paths.status_path {
            errors.push(ValidationError::PathCollision(reload_path.clone()));
        }
    }

    if StatusCode::from_u16(config.redirects.redirect_code).is_err() {
        errors.push(ValidationError::InvalidRedirectCode(
            config.redirects.redirect_code,
        ));
    }

    if config.redirects.field_delimiter.is_empty() {
        errors.push(ValidationError::EmptyFieldDelimiter);
    }

    if config.listener.ip.parse::<std::net::IpAddr>().is_err() {
        errors.push(ValidationError::InvalidListenIp(config.listener.ip.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

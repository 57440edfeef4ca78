//! Redirect table loading and merging.
//!
//! Sources merge in a fixed order: redirect files left to right (a later
//! file wins a key collision), then inline from/to pairs, which always
//! win. Malformed rows and unreadable files are logged and skipped;
//! loading itself never fails.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::redirects::entry::{RedirectEntry, RedirectTable};

/// The redirect sources fixed at startup.
///
/// A reload re-reads file contents; the source list and delimiter never
/// change for the process lifetime.
#[derive(Debug, Clone)]
pub struct RedirectSources {
    /// Inline (from, to) pairs; always override file entries.
    pub from_to: Vec<(String, String)>,

    /// Redirect files, processed left to right.
    pub files: Vec<PathBuf>,

    /// Field delimiter within redirect files.
    pub field_delimiter: String,
}

impl RedirectSources {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            from_to: config
                .redirects
                .from_to
                .iter()
                .map(|pair| (pair.from.clone(), pair.to.clone()))
                .collect(),
            files: config.redirects.files.clone(),
            field_delimiter: config.redirects.field_delimiter.clone(),
        }
    }
}

/// A row with too few delimited fields.
#[derive(Debug, Error)]
#[error("expected at least 4 fields, found {found}")]
pub struct RowError {
    found: usize,
}

/// Accepted timestamp layouts: `2019-07-01 01:20:33` or `2019-07-01T01:20:33`.
const CREATED_AT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an entry timestamp, falling back to the current time on failure.
///
/// The fallback keeps the row instead of rejecting it; redirect files have
/// always been forgiving about the record-keeping fields.
pub fn parse_created_at(input: &str) -> NaiveDateTime {
    let trimmed = input.trim();
    for format in CREATED_AT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return parsed;
        }
    }
    tracing::error!(input, "bad datetime input, falling back to current datetime");
    now_to_second()
}

fn now_to_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Best-effort name of the invoking user, for inline entry provenance.
fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Parse one delimited row: from, to, created-by, created-at. Extra fields
/// are ignored; an empty line yields `None`.
fn parse_row(
    line: &str,
    field_delimiter: &str,
) -> Result<Option<(String, RedirectEntry)>, RowError> {
    if line.is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split(field_delimiter).collect();
    if fields.len() < 4 {
        return Err(RowError {
            found: fields.len(),
        });
    }
    let entry = RedirectEntry {
        to_url: fields[1].to_string(),
        created_by: fields[2].to_string(),
        created_at: parse_created_at(fields[3]),
    };
    Ok(Some((fields[0].to_string(), entry)))
}

/// Parse every redirect file into one map; later files win key collisions.
///
/// An unreadable file contributes zero entries and the remaining files
/// still load; a malformed row is skipped and the rest of its file still
/// loads.
fn load_redirects_files(
    files: &[PathBuf],
    field_delimiter: &str,
) -> BTreeMap<String, RedirectEntry> {
    let mut entries = BTreeMap::new();

    for path in files {
        tracing::info!(file = %path.display(), "processing redirects file");
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                tracing::error!(file = %path.display(), %error, "cannot read redirects file, skipping");
                continue;
            }
        };
        for (index, line) in content.lines().enumerate() {
            match parse_row(line, field_delimiter) {
                Ok(Some((from_path, entry))) => {
                    tracing::debug!(file = %path.display(), line = index + 1, from = %from_path, "loaded row");
                    entries.insert(from_path, entry);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::error!(file = %path.display(), line = index + 1, %error, "skipping malformed row");
                }
            }
        }
    }

    entries
}

/// Build a table snapshot from the given sources.
///
/// Pure function of its inputs and the current file contents; same inputs
/// yield an equivalent table.
pub fn load_redirects(sources: &RedirectSources) -> RedirectTable {
    let mut entries = load_redirects_files(&sources.files, &sources.field_delimiter);

    // Inline pairs are applied last and always win.
    let user = current_user();
    let now = now_to_second();
    for (from_path, to_url) in &sources.from_to {
        entries.insert(
            from_path.clone(),
            RedirectEntry {
                to_url: to_url.clone(),
                created_by: user.clone(),
                created_at: now,
            },
        );
    }

    RedirectTable::new(entries)
}

//! Redirect entry and table snapshot types.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

/// One redirect mapping plus provenance metadata.
///
/// `created_by` and `created_at` are record-keeping fields: they are echoed
/// in response headers and on the status page but never affect matching.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectEntry {
    /// Destination placed verbatim into the `Location` header.
    pub to_url: String,

    /// User that created the entry.
    pub created_by: String,

    /// When the entry was created.
    pub created_at: NaiveDateTime,
}

/// An immutable snapshot of the redirect table.
///
/// Built in one step by the loader and shared read-only between request
/// handlers. A reload produces a brand-new snapshot; the old one lives
/// until the last in-flight request drops its reference.
#[derive(Debug, Clone)]
pub struct RedirectTable {
    entries: BTreeMap<String, RedirectEntry>,
    loaded_at: DateTime<Local>,
}

impl RedirectTable {
    pub fn new(entries: BTreeMap<String, RedirectEntry>) -> Self {
        let now = Local::now();
        Self {
            entries,
            // sub-second precision is distracting on the status page
            loaded_at: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    /// Exact-key lookup. Case-sensitive, no prefix matching, no
    /// trailing-slash normalization.
    pub fn get(&self, from_path: &str) -> Option<&RedirectEntry> {
        self.entries.get(from_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RedirectEntry)> {
        self.entries.iter()
    }

    /// When this snapshot was built (the "last reload time").
    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}

impl Default for RedirectTable {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(to: &str) -> RedirectEntry {
        RedirectEntry {
            to_url: to.to_string(),
            created_by: "alice".to_string(),
            created_at: NaiveDate::from_ymd_opt(2019, 7, 1)
                .unwrap()
                .and_hms_opt(1, 20, 33)
                .unwrap(),
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let mut entries = BTreeMap::new();
        entries.insert("/hr".to_string(), entry("http://intranet/hr"));
        let table = RedirectTable::new(entries);

        assert!(table.get("/hr").is_some());
        assert!(table.get("/HR").is_none());
        assert!(table.get("/hr/").is_none());
        assert!(table.get("/h").is_none());
    }

    #[test]
    fn iter_yields_sorted_keys() {
        let mut entries = BTreeMap::new();
        entries.insert("/z".to_string(), entry("http://z"));
        entries.insert("/a".to_string(), entry("http://a"));
        entries.insert("/m".to_string(), entry("http://m"));
        let table = RedirectTable::new(entries);

        let keys: Vec<_> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["/a", "/m", "/z"]);
    }
}

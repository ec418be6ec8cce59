//! Recent-query history
//!
//! The history is a small most-recent-first list of normalized queries. Every
//! operation here is a pure transform: the input list is borrowed and a new
//! list is returned, so callers can hold on to older snapshots freely.
//!
//! Invariants kept by [`add`]:
//! - the list never grows past the configured maximum
//! - no two adjacent entries share the same query text
//! - no entry holds an empty or whitespace-only query

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept when no explicit limit is given
pub const DEFAULT_MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  /// Trimmed, non-empty query text
  pub query: String,
  /// When the query was last recorded; informational only, never used for ordering
  pub recorded_at: DateTime<Utc>,
}

/// Ordered list of history entries, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
  entries: Vec<HistoryEntry>,
}

impl HistoryList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The most recent entry
  pub fn first(&self) -> Option<&HistoryEntry> {
    self.entries.first()
  }

  pub fn entries(&self) -> &[HistoryEntry] {
    &self.entries
  }

  pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
    self.entries.iter()
  }
}

impl<'a> IntoIterator for &'a HistoryList {
  type Item = &'a HistoryEntry;
  type IntoIter = std::slice::Iter<'a, HistoryEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
  /// Upper bound on the list length. `None` or `Some(0)` means the default.
  pub max_entries: Option<usize>,
}

impl AddOptions {
  pub fn with_max_entries(max_entries: usize) -> Self {
    Self { max_entries: Some(max_entries) }
  }

  pub fn resolved_max_entries(&self) -> usize {
    self.max_entries.filter(|&n| n > 0).unwrap_or(DEFAULT_MAX_ENTRIES)
  }
}

/// Trim a raw query, returning `None` when nothing is left
pub fn normalize_query(raw: &str) -> Option<&str> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then_some(trimmed)
}

/// Record `raw_query` as the most recent query, stamped with the current time
pub fn add(history: &HistoryList, raw_query: &str, options: AddOptions) -> HistoryList {
  add_at(history, raw_query, options, Utc::now())
}

/// Record `raw_query` as the most recent query, stamped with `now`.
///
/// Blank queries leave the history as it was. Repeating the most recent query
/// refreshes its timestamp instead of adding a second entry.
pub fn add_at(
  history: &HistoryList,
  raw_query: &str,
  options: AddOptions,
  now: DateTime<Utc>,
) -> HistoryList {
  let Some(query) = normalize_query(raw_query) else {
    return history.clone();
  };

  let max_entries = options.resolved_max_entries();
  let mut entries = Vec::with_capacity((history.len() + 1).min(max_entries));

  match history.first() {
    Some(latest) if latest.query == query => {
      entries.push(HistoryEntry { query: latest.query.clone(), recorded_at: now });
      entries.extend(history.iter().skip(1).cloned());
    }
    _ => {
      entries.push(HistoryEntry { query: query.to_string(), recorded_at: now });
      entries.extend(history.iter().cloned());
    }
  }

  entries.truncate(max_entries);
  HistoryList { entries }
}

/// Query strings of every entry, most recent first
pub fn recent_queries(history: &HistoryList) -> Vec<String> {
  history.iter().map(|entry| entry.query.clone()).collect()
}

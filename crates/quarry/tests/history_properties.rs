use chrono::{TimeZone, Utc};
use quarry::history::{
  self, add, add_at, recent_queries, AddOptions, HistoryList, DEFAULT_MAX_ENTRIES,
};

const QUERY_POOL: &[&str] =
  &["cats", "  cats", "dogs ", "", "   ", "\t", "rust", "rust memory model", "a", "b", "cats"];

fn assert_invariants(history: &HistoryList, max_entries: usize) {
  assert!(history.len() <= max_entries, "length {} exceeds {max_entries}", history.len());

  for entry in history.iter() {
    assert!(!entry.query.trim().is_empty(), "blank entry recorded");
    assert_eq!(entry.query, entry.query.trim(), "entry not normalized");
  }

  for pair in history.entries().windows(2) {
    assert_ne!(pair[0].query, pair[1].query, "adjacent duplicates: {:?}", recent_queries(history));
  }
}

/// Deterministic walk through the query pool with a simple LCG
fn query_sequence(seed: u64, len: usize) -> Vec<&'static str> {
  let mut state = seed;
  (0..len)
    .map(|_| {
      state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      QUERY_POOL[(state >> 33) as usize % QUERY_POOL.len()]
    })
    .collect()
}

#[test]
fn test_invariants_hold_for_arbitrary_sequences() {
  for seed in 0..200 {
    for max_entries in [1, 2, 3, 5, DEFAULT_MAX_ENTRIES] {
      let options = AddOptions::with_max_entries(max_entries);
      let mut history = HistoryList::new();

      for query in query_sequence(seed, 40) {
        let next = add(&history, query, options);
        assert_invariants(&next, max_entries);
        history = next;
      }
    }
  }
}

#[test]
fn test_default_options_hold_invariants() {
  let mut history = HistoryList::new();
  for query in query_sequence(42, 100) {
    history = add(&history, query, AddOptions::default());
    assert_invariants(&history, DEFAULT_MAX_ENTRIES);
  }
}

#[test]
fn test_near_duplicate_is_idempotent() {
  for seed in 0..50 {
    let mut history = HistoryList::new();
    for query in query_sequence(seed, 12) {
      history = add(&history, query, AddOptions::default());
    }

    let once = add(&history, "cats", AddOptions::default());
    let twice = add(&once, "cats", AddOptions::default());

    assert_eq!(twice.len(), once.len());
    assert_eq!(twice.first().unwrap().query, "cats");
  }
}

#[test]
fn test_whitespace_returns_equal_history() {
  let history = add(&HistoryList::new(), "a", AddOptions::default());
  let history = add(&history, "b", AddOptions::default());
  assert_eq!(add(&history, "   ", AddOptions::default()), history);
}

#[test]
fn test_fourth_query_evicts_oldest() {
  let options = AddOptions::with_max_entries(3);
  let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

  let history = ["10 items...", "second", "third", "fourth"].iter().enumerate().fold(
    HistoryList::new(),
    |history, (i, query)| {
      add_at(&history, query, options, start + chrono::Duration::seconds(i as i64))
    },
  );

  assert_eq!(history.len(), 3);
  assert!(!recent_queries(&history).contains(&"10 items...".to_string()));
  assert_eq!(recent_queries(&history), vec!["fourth", "third", "second"]);
}

#[test]
fn test_input_is_unchanged_after_add() {
  let history = add(&HistoryList::new(), "kept", AddOptions::default());
  let before = history.clone();

  let _ = add(&history, "new", AddOptions::with_max_entries(1));

  assert_eq!(history, before);
}

#[test]
fn test_recent_queries_projection() {
  let history = add(&HistoryList::new(), "a", AddOptions::default());
  let history = add(&history, "b", AddOptions::default());

  assert_eq!(recent_queries(&history), vec!["b", "a"]);
  assert_eq!(recent_queries(&history).len(), history.len());
  assert_eq!(history::normalize_query(" a "), Some("a"));
}

#[test]
fn test_history_serializes_as_plain_list() {
  let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
  let history = add_at(&HistoryList::new(), "cats", AddOptions::default(), at);

  let json = serde_json::to_value(&history).unwrap();

  assert_eq!(json, serde_json::json!([{ "query": "cats", "recorded_at": "2023-11-14T22:13:20Z" }]));
  let restored: HistoryList = serde_json::from_value(json).unwrap();
  assert_eq!(restored, history);
}

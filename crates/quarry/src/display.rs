//! Display formatting utilities for a presentation layer

use colored::*;

use crate::models::SearchResultItem;
use crate::session::{Phase, SessionState};

/// Scores are always shown with three decimals
pub fn format_score(score: f64) -> String {
  format!("{score:.3}")
}

/// One result as `title (score: 0.123)`, with the reason on an indented line
pub fn format_result(result: &SearchResultItem) -> String {
  let title = result.document.metadata.title.bold();
  let mut line = format!("{title} (score: {})", format_score(result.score));
  if let Some(reason) = result.reason.as_deref().filter(|r| !r.trim().is_empty()) {
    line.push_str(&format!("\n  {}", reason.dimmed()));
  }
  line
}

/// Recent queries joined for a single-line "Recent searches" strip
pub fn format_recent_queries(state: &SessionState) -> Option<String> {
  let recent = state.recent_queries();
  if recent.is_empty() {
    return None;
  }
  Some(format!("Recent searches: {}", recent.join(" | ")))
}

/// Short status text for the current phase, if any should be shown
pub fn status_line(state: &SessionState) -> Option<String> {
  match state.phase() {
    Phase::Idle => None,
    Phase::Loading => Some("Searching...".to_string()),
    Phase::Failed => state.error().map(|e| e.message().red().to_string()),
    Phase::Succeeded => match state.results() {
      Some([]) => Some("No results yet. Try searching for something.".to_string()),
      _ => None,
    },
  }
}

/// Label for the submit control
pub fn submit_label(state: &SessionState) -> &'static str {
  if state.is_loading() {
    "Searching..."
  } else {
    "Search"
  }
}

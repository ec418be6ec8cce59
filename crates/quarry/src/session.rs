//! Search session lifecycle
//!
//! A session moves through `Idle -> Loading -> (Succeeded | Failed)` for every
//! accepted submission. The state lives with the caller; the session only
//! holds the transport and its policy settings.
//!
//! Overlapping submissions are not serialized here. Each one runs to
//! completion and the last one to resolve decides the final phase, results
//! and error. Callers that need strict ordering (or want to drop superseded
//! responses) must sequence their calls themselves.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{validate_top_k, SessionConfig};
use crate::error::{ConfigError, SearchError, UNEXPECTED_ERROR_MESSAGE};
use crate::history::{self, AddOptions, HistoryList};
use crate::models::SearchResultItem;
use crate::transport::SearchTransport;

/// Results requested per search unless configured otherwise
pub const DEFAULT_TOP_K: u32 = 5;
/// History bound applied by the session, independent of `top_k`
pub const HISTORY_MAX_ENTRIES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
  #[default]
  Idle,
  Loading,
  Succeeded,
  Failed,
}

/// Everything a presentation layer needs to render one search surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
  phase: Phase,
  last_query: Option<String>,
  results: Option<Vec<SearchResultItem>>,
  error: Option<SearchError>,
  history: HistoryList,
}

impl SessionState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start from an existing history, e.g. one carried over from another surface
  pub fn with_history(history: HistoryList) -> Self {
    Self { history, ..Self::default() }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  /// Last normalized query submitted, kept after failures for retry
  pub fn last_query(&self) -> Option<&str> {
    self.last_query.as_deref()
  }

  /// Present only while the phase is `Succeeded`
  pub fn results(&self) -> Option<&[SearchResultItem]> {
    self.results.as_deref()
  }

  /// Present only while the phase is `Failed`
  pub fn error(&self) -> Option<&SearchError> {
    self.error.as_ref()
  }

  pub fn history(&self) -> &HistoryList {
    &self.history
  }

  pub fn recent_queries(&self) -> Vec<String> {
    history::recent_queries(&self.history)
  }

  pub fn is_loading(&self) -> bool {
    self.phase == Phase::Loading
  }

  /// Whether a submit control for `input` should be enabled
  pub fn can_submit(&self, input: &str) -> bool {
    !self.is_loading() && history::normalize_query(input).is_some()
  }
}

/// A submission that has entered `Loading` and still awaits its transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
  pub request_id: Uuid,
  pub query: String,
  pub top_k: u32,
}

/// Resolution of a [`PendingSearch`], ready to be applied to a state
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
  pub request_id: Uuid,
  pub query: String,
  pub result: Result<Vec<SearchResultItem>, SearchError>,
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct SearchSession<T> {
  transport: T,
  top_k: u32,
  clock: Clock,
}

impl<T: SearchTransport> SearchSession<T> {
  pub fn new(transport: T) -> Self {
    Self { transport, top_k: DEFAULT_TOP_K, clock: Box::new(Utc::now) }
  }

  pub fn from_config(transport: T, config: &SessionConfig) -> Result<Self, ConfigError> {
    Self::new(transport).with_top_k(config.top_k)
  }

  /// Override the number of results requested per search
  pub fn with_top_k(self, top_k: u32) -> Result<Self, ConfigError> {
    let top_k = validate_top_k(top_k)?;
    Ok(Self { top_k, ..self })
  }

  /// Replace the timestamp source used for history entries
  pub fn with_clock(self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
    Self { clock: Box::new(clock), ..self }
  }

  pub fn top_k(&self) -> u32 {
    self.top_k
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Run one submission to completion against `state`.
  ///
  /// Returns `false` without touching the state when the query is blank.
  pub async fn submit(&self, state: &mut SessionState, raw_query: &str) -> bool {
    let Some(pending) = self.begin(state, raw_query) else {
      return false;
    };
    let outcome = self.execute(&pending).await;
    self.complete(state, outcome);
    true
  }

  /// Normalize the query and move the state to `Loading`.
  ///
  /// Blank input is a no-op and yields `None`.
  pub fn begin(&self, state: &mut SessionState, raw_query: &str) -> Option<PendingSearch> {
    let query = history::normalize_query(raw_query)?.to_string();
    let pending = PendingSearch { request_id: Uuid::new_v4(), query, top_k: self.top_k };

    debug!(
      request_id = %pending.request_id,
      query = %pending.query,
      top_k = pending.top_k,
      "search loading"
    );
    state.phase = Phase::Loading;
    state.last_query = Some(pending.query.clone());
    state.results = None;
    state.error = None;
    Some(pending)
  }

  /// Perform the transport call for `pending`, classifying any failure.
  ///
  /// Never fails and never panics: a panicking transport is reported as an
  /// unexpected error.
  pub async fn execute(&self, pending: &PendingSearch) -> SearchOutcome {
    let call = async { self.transport.execute(&pending.query, pending.top_k).await };
    let result = match AssertUnwindSafe(call).catch_unwind().await {
      Ok(Ok(results)) => Ok(results),
      Ok(Err(err)) => Err(SearchError::classify(&err)),
      Err(_) => Err(SearchError::unexpected(UNEXPECTED_ERROR_MESSAGE)),
    };

    SearchOutcome { request_id: pending.request_id, query: pending.query.clone(), result }
  }

  /// Apply a resolved search to `state`. Only successes touch the history.
  pub fn complete(&self, state: &mut SessionState, outcome: SearchOutcome) {
    match outcome.result {
      Ok(results) => {
        info!(
          request_id = %outcome.request_id,
          query = %outcome.query,
          count = results.len(),
          "search succeeded"
        );
        let options = AddOptions::with_max_entries(HISTORY_MAX_ENTRIES);
        state.history = history::add_at(&state.history, &outcome.query, options, (self.clock)());
        state.phase = Phase::Succeeded;
        state.results = Some(results);
        state.error = None;
      }
      Err(error) => {
        warn!(
          request_id = %outcome.request_id,
          query = %outcome.query,
          status = ?error.status_code(),
          "search failed: {}",
          error.message()
        );
        state.phase = Phase::Failed;
        state.results = None;
        state.error = Some(error);
      }
    }
  }
}

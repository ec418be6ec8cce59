//! Quarry - search session lifecycle and recent-query history
//!
//! Quarry drives a single document search at a time against a backend search
//! endpoint, classifies the outcome, and records successful queries in a
//! bounded, most-recent-first history list that a presentation layer can
//! render as re-submission shortcuts.

pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod logging;
pub mod models;
pub mod session;
pub mod transport;

pub use config::{ClientConfig, Config, SessionConfig};
pub use error::{ConfigError, SearchError, TransportError};
pub use history::{add, recent_queries, AddOptions, HistoryEntry, HistoryList};
pub use models::{DocumentId, DocumentMetadata, SearchDocument, SearchRequest, SearchResultItem};
pub use session::{PendingSearch, Phase, SearchOutcome, SearchSession, SessionState};
pub use transport::{HttpTransport, SearchTransport};

//! Error taxonomy for search transports, session outcomes and configuration

use thiserror::Error;

/// Message used when a failure carries no explanation of its own
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error while searching.";

/// Failure raised by a search transport.
///
/// `status_code` is `None` when the request failed before an HTTP status was
/// known, e.g. the connection could not be established.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
  pub message: String,
  pub status_code: Option<u16>,
}

impl TransportError {
  pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
    Self { message: message.into(), status_code }
  }

  /// The request never produced a response
  pub fn unsent(message: impl Into<String>) -> Self {
    Self::new(message, None)
  }

  /// The backend answered with `status`
  pub fn http(status: u16, message: impl Into<String>) -> Self {
    Self::new(message, Some(status))
  }

  /// Build the error for a non-success response, enriching the generic
  /// message with the backend's explanation when one was supplied.
  pub fn from_status(status: u16, detail: Option<&str>) -> Self {
    let mut message = format!("Search request failed ({status})");
    if let Some(detail) = detail.map(str::trim).filter(|d| !d.is_empty()) {
      message.push_str(": ");
      message.push_str(detail);
    }
    Self::http(status, message)
  }
}

/// Classified outcome of a failed search, as surfaced in session state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
  #[error(transparent)]
  Transport(#[from] TransportError),

  #[error("{message}")]
  Unexpected { message: String },
}

impl SearchError {
  pub fn unexpected(message: impl Into<String>) -> Self {
    let message = message.into();
    if message.trim().is_empty() {
      return Self::Unexpected { message: UNEXPECTED_ERROR_MESSAGE.to_string() };
    }
    Self::Unexpected { message }
  }

  /// Sort an arbitrary failure into the taxonomy. Anything that is not a
  /// `TransportError` somewhere in the chain becomes `Unexpected`.
  pub fn classify(err: &anyhow::Error) -> Self {
    if let Some(transport) = err.chain().find_map(|e| e.downcast_ref::<TransportError>()) {
      return Self::Transport(transport.clone());
    }
    Self::unexpected(err.to_string())
  }

  /// Human-readable text for the presentation layer
  pub fn message(&self) -> &str {
    match self {
      SearchError::Transport(e) => &e.message,
      SearchError::Unexpected { message } => message,
    }
  }

  pub fn status_code(&self) -> Option<u16> {
    match self {
      SearchError::Transport(e) => e.status_code,
      SearchError::Unexpected { .. } => None,
    }
  }
}

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to read config file {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse config file {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid configuration: {message}")]
  Invalid { message: String },
}

impl ConfigError {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::Invalid { message: message.into() }
  }
}

//! Search transport: the boundary between a session and the search backend

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::models::{ErrorBody, SearchRequest, SearchResultItem};

/// Performs one search call against the backend.
///
/// Implementations must not retry, and must report every failure as an error
/// rather than an empty result list. HTTP-level failures should be surfaced as
/// [`TransportError`] so the session can classify them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchTransport: Send + Sync {
  async fn execute(&self, query: &str, top_k: u32) -> Result<Vec<SearchResultItem>>;
}

/// reqwest-backed transport posting JSON to the configured search route
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: Client,
  endpoint: String,
}

impl HttpTransport {
  pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| TransportError::unsent(format!("Failed to create HTTP client: {e}")))?;

    Ok(Self { client, endpoint: config.endpoint() })
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  async fn post(&self, query: &str, top_k: u32) -> Result<Vec<SearchResultItem>, TransportError> {
    let request = SearchRequest { query: query.to_string(), top_k };

    debug!(endpoint = %self.endpoint, query, top_k, "sending search request");
    let response = self
      .client
      .post(&self.endpoint)
      .json(&request)
      .send()
      .await
      .map_err(|e| TransportError::unsent(format!("Search request could not be sent: {e}")))?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
      // A body that is not JSON simply yields no explanation
      let body: ErrorBody = response.json().await.unwrap_or_default();
      let error = TransportError::from_status(status, body.explanation());
      warn!(status, message = %error.message, "search request rejected");
      return Err(error);
    }

    let body = response.bytes().await.map_err(|e| {
      TransportError::http(status, format!("Failed to read search response: {e}"))
    })?;

    let results: Vec<SearchResultItem> = serde_json::from_slice(&body).map_err(|e| {
      TransportError::http(status, format!("Search response could not be parsed: {e}"))
    })?;

    debug!(status, count = results.len(), "search request succeeded");
    Ok(results)
  }
}

#[async_trait]
impl SearchTransport for HttpTransport {
  async fn execute(&self, query: &str, top_k: u32) -> Result<Vec<SearchResultItem>> {
    Ok(self.post(query, top_k).await?)
  }
}

//! Wire types exchanged with the search endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body sent to the search route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
  pub query: String,
  pub top_k: u32,
}

/// Document identifiers arrive as either numbers or strings depending on
/// which index produced the hit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
  Number(i64),
  Text(String),
}

impl fmt::Display for DocumentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DocumentId::Number(n) => write!(f, "{n}"),
      DocumentId::Text(s) => f.write_str(s),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
  pub id: DocumentId,
  pub title: String,
  /// Any additional metadata fields, kept verbatim
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
  #[serde(rename = "page_content", alias = "content")]
  pub content: String,
  pub metadata: DocumentMetadata,
}

/// One ranked hit, in the order the backend returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
  pub document: SearchDocument,
  pub score: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

/// Optional explanation carried by a failed response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
  #[serde(default)]
  pub error: Option<String>,
  #[serde(default)]
  pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
  pub(crate) fn explanation(&self) -> Option<&str> {
    self.error.as_deref().or_else(|| self.detail.as_ref().and_then(|d| d.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_result_item_from_backend_payload() {
    let payload = json!({
      "document": {
        "page_content": "Ownership rules in Rust",
        "metadata": { "id": 7, "title": "Ownership", "source": "book" }
      },
      "score": 0.8125,
      "reason": "vector similarity"
    });

    let item: SearchResultItem = serde_json::from_value(payload).unwrap();

    assert_eq!(item.document.content, "Ownership rules in Rust");
    assert_eq!(item.document.metadata.id, DocumentId::Number(7));
    assert_eq!(item.document.metadata.title, "Ownership");
    assert_eq!(item.document.metadata.extra.get("source"), Some(&json!("book")));
    assert_eq!(item.reason.as_deref(), Some("vector similarity"));
  }

  #[test]
  fn test_result_item_accepts_content_alias_and_text_id() {
    let payload = json!({
      "document": {
        "content": "MATCH (n) RETURN n",
        "metadata": { "id": "mock_id", "title": "Mock" }
      },
      "score": 0.9
    });

    let item: SearchResultItem = serde_json::from_value(payload).unwrap();

    assert_eq!(item.document.metadata.id, DocumentId::Text("mock_id".to_string()));
    assert_eq!(item.document.metadata.id.to_string(), "mock_id");
    assert!(item.reason.is_none());
  }

  #[test]
  fn test_error_body_prefers_error_over_detail() {
    let body: ErrorBody =
      serde_json::from_value(json!({ "error": "index unavailable", "detail": "other" })).unwrap();
    assert_eq!(body.explanation(), Some("index unavailable"));

    let body: ErrorBody =
      serde_json::from_value(json!({ "detail": "Query must not be empty." })).unwrap();
    assert_eq!(body.explanation(), Some("Query must not be empty."));

    let body: ErrorBody =
      serde_json::from_value(json!({ "detail": [{ "loc": ["body"] }] })).unwrap();
    assert_eq!(body.explanation(), None);
  }
}

//! Error taxonomy for chain construction and the completion service.
//!
//! Link execution never surfaces these: a failing link logs and forwards its
//! state unchanged, so the executor always completes.

use thiserror::Error;

/// Errors from chain construction, the completion service, and I/O plumbing.
#[derive(Debug, Error)]
pub enum ChainError {
  /// Pipeline has LLM steps but no completion service was supplied.
  #[error("no completion service available for pipeline '{0}'")]
  ServiceUnavailable(String),

  /// Transport-level failure talking to the completion backend.
  #[error("completion request failed: {0}")]
  Network(#[from] reqwest::Error),

  /// Malformed payload from the completion backend.
  #[error("malformed completion response: {0}")]
  Parse(#[from] serde_json::Error),

  /// Absent settings, template, or registry entry.
  #[error("missing configuration: {0}")]
  ConfigurationMissing(String),
}

//! Completion service collaborator: the seam between chain links and the
//! model backend. Implementations are injected at chain construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::types::{ChainState, ModelSettings};

/// One message of a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self {
      role: "system".to_string(),
      content: content.into(),
    }
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self {
      role: "user".to_string(),
      content: content.into(),
    }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self {
      role: "assistant".to_string(),
      content: content.into(),
    }
  }
}

/// Asynchronous request/response collaborator for model calls.
///
/// Links treat this as opaque; the only production implementation is
/// [crate::ollama::OllamaClient], and tests substitute scripted fakes.
#[async_trait]
pub trait CompletionService: Send + Sync {
  /// Free-text completion. The settings' system-prompt template is used as
  /// given, without state rendering.
  async fn generate(&self, settings: &ModelSettings, prompt: &str) -> Result<String, ChainError>;

  /// Free-text completion with the settings' system-prompt template rendered
  /// against `state` first. When the settings carry a response schema, its
  /// format instructions are appended to the system context.
  async fn generate_with_state(
    &self,
    settings: &ModelSettings,
    prompt: &str,
    state: &ChainState,
  ) -> Result<String, ChainError>;

  /// Multi-turn chat completion; returns the assistant message content.
  async fn chat(
    &self,
    settings: &ModelSettings,
    messages: &[ChatMessage],
  ) -> Result<String, ChainError>;

  /// Embeds each input string; one vector per input.
  async fn embed(
    &self,
    settings: &ModelSettings,
    inputs: &[String],
  ) -> Result<Vec<Vec<f32>>, ChainError>;
}

//! Ollama HTTP client: the production [CompletionService] implementation.
//!
//! Wire format per the Ollama JSON API: `POST /api/generate`, `/api/chat`,
//! `/api/embed` with `stream: false`; sampling parameters travel in the
//! `options` object.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ChainError;
use crate::service::{ChatMessage, CompletionService};
use crate::template;
use crate::types::{ChainState, ModelSettings, SamplingOptions};

/// Default Ollama endpoint on a local install.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// HTTP client for a single Ollama endpoint.
pub struct OllamaClient {
  base_url: String,
  http: reqwest::Client,
}

impl OllamaClient {
  /// Creates a client for the given base URL (trailing slashes stripped).
  pub fn new(base_url: impl Into<String>) -> Self {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
      base_url.pop();
    }
    Self {
      base_url,
      http: reqwest::Client::new(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/api/{}", self.base_url, path)
  }

  async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ChainError>
  where
    B: Serialize + ?Sized,
    R: for<'de> Deserialize<'de>,
  {
    let resp = self
      .http
      .post(self.endpoint(path))
      .json(body)
      .send()
      .await?
      .error_for_status()?;
    let text = resp.text().await?;
    Ok(serde_json::from_str::<R>(&text)?)
  }
}

impl Default for OllamaClient {
  fn default() -> Self {
    Self::new(DEFAULT_OLLAMA_URL)
  }
}

/// Builds the system context for a state-rendered call: the settings' system
/// template rendered against state, plus schema format instructions when the
/// settings declare a schema. None when the settings carry neither.
#[instrument(level = "trace", skip(settings, state))]
pub(crate) fn system_context(settings: &ModelSettings, state: &ChainState) -> Option<String> {
  let rendered = settings
    .system_prompt
    .as_deref()
    .map(|t| template::render(t, state));
  let instructions = settings.schema.as_ref().map(|s| s.format_instructions());
  match (rendered, instructions) {
    (Some(mut sys), Some(extra)) => {
      sys.push_str("\n\n");
      sys.push_str(&extra);
      Some(sys)
    }
    (some @ Some(_), None) => some,
    (None, some @ Some(_)) => some,
    (None, None) => None,
  }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
  pub(crate) model: &'a str,
  pub(crate) prompt: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) system: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) format: Option<&'a str>,
  pub(crate) stream: bool,
  pub(crate) options: &'a SamplingOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
  pub(crate) response: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
  pub(crate) model: &'a str,
  pub(crate) messages: &'a [ChatMessage],
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) format: Option<&'a str>,
  pub(crate) stream: bool,
  pub(crate) options: &'a SamplingOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
  pub(crate) message: ChatMessage,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedRequest<'a> {
  pub(crate) model: &'a str,
  pub(crate) input: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbedResponse {
  pub(crate) embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl CompletionService for OllamaClient {
  async fn generate(&self, settings: &ModelSettings, prompt: &str) -> Result<String, ChainError> {
    debug!(model = %settings.model, "generate");
    let req = GenerateRequest {
      model: &settings.model,
      prompt,
      system: settings.system_prompt.as_deref(),
      format: settings.format.as_deref(),
      stream: false,
      options: &settings.options,
    };
    let resp: GenerateResponse = self.post_json("generate", &req).await?;
    Ok(resp.response)
  }

  async fn generate_with_state(
    &self,
    settings: &ModelSettings,
    prompt: &str,
    state: &ChainState,
  ) -> Result<String, ChainError> {
    debug!(model = %settings.model, "generate with state");
    let system = system_context(settings, state);
    let req = GenerateRequest {
      model: &settings.model,
      prompt,
      system: system.as_deref(),
      format: settings.format.as_deref(),
      stream: false,
      options: &settings.options,
    };
    let resp: GenerateResponse = self.post_json("generate", &req).await?;
    Ok(resp.response)
  }

  async fn chat(
    &self,
    settings: &ModelSettings,
    messages: &[ChatMessage],
  ) -> Result<String, ChainError> {
    debug!(model = %settings.model, count = messages.len(), "chat");
    let req = ChatRequest {
      model: &settings.model,
      messages,
      format: settings.format.as_deref(),
      stream: false,
      options: &settings.options,
    };
    let resp: ChatResponse = self.post_json("chat", &req).await?;
    Ok(resp.message.content)
  }

  async fn embed(
    &self,
    settings: &ModelSettings,
    inputs: &[String],
  ) -> Result<Vec<Vec<f32>>, ChainError> {
    debug!(model = %settings.model, count = inputs.len(), "embed");
    let req = EmbedRequest {
      model: &settings.model,
      input: inputs,
    };
    let resp: EmbedResponse = self.post_json("embed", &req).await?;
    Ok(resp.embeddings)
  }
}

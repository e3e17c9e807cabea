//! Model settings for one LLM call: model name, system template, sampling.

use serde::{Deserialize, Serialize};

use super::ResponseSchema;

/// Settings for one model invocation, owned by the step that uses them.
///
/// `system_prompt` is a template; `{{key}}` placeholders in it are rendered
/// against the current chain state before the call goes out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
  /// Model identifier as known to the backend (e.g. `llama3.2`).
  pub model: String,
  /// System-prompt template rendered against state before each call.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub system_prompt: Option<String>,
  /// Response format constraint passed to the backend (e.g. `json`).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  /// Expected top-level properties of a JSON response, when the step
  /// extracts structured output.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<ResponseSchema>,
  /// Sampling parameters forwarded verbatim as the backend `options` object.
  #[serde(default)]
  pub options: SamplingOptions,
}

impl ModelSettings {
  pub fn new(model: impl Into<String>) -> Self {
    Self {
      model: model.into(),
      system_prompt: None,
      format: None,
      schema: None,
      options: SamplingOptions::default(),
    }
  }
}

/// Sampling parameters; unset fields are omitted from the wire request so the
/// backend falls back to its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub temperature: Option<f32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub top_p: Option<f32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub top_k: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub num_predict: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub repeat_penalty: Option<f32>,
}

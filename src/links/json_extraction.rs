//! JSON extraction link: obtain a JSON object from the model and merge its
//! top-level properties into state, retrying on malformed output.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::service::CompletionService;
use crate::template;
use crate::types::{ChainState, ModelSettings};

use super::ChainLink;

/// Link that retries a completion until the response parses as a top-level
/// JSON object, then writes every top-level property into state.
///
/// Retry semantics: the attempt counter starts at 1; `max_retries` is the
/// total attempt bound (clamped to at least 1); the delay is awaited between
/// attempts. Arrays, primitives, parse failures, and transport errors all
/// consume an attempt. After exhausting every attempt the input state is
/// returned unchanged, with no error keys injected; callers detect
/// failure by the absence of expected keys.
pub struct JsonExtractionLink {
  id: String,
  settings: ModelSettings,
  prompt: String,
  max_retries: u32,
  retry_delay: Duration,
  service: Arc<dyn CompletionService>,
}

impl JsonExtractionLink {
  pub fn new(
    id: impl Into<String>,
    settings: ModelSettings,
    prompt: impl Into<String>,
    max_retries: u32,
    retry_delay_secs: f32,
    service: Arc<dyn CompletionService>,
  ) -> Self {
    Self {
      id: id.into(),
      settings,
      prompt: prompt.into(),
      max_retries: max_retries.max(1),
      retry_delay: Duration::from_secs_f32(retry_delay_secs.max(0.0)),
      service,
    }
  }

  pub fn max_retries(&self) -> u32 {
    self.max_retries
  }

  pub fn retry_delay(&self) -> Duration {
    self.retry_delay
  }
}

/// State value for one top-level JSON property: strings as their content,
/// everything else as its compact JSON text.
pub(crate) fn property_text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

#[async_trait]
impl ChainLink for JsonExtractionLink {
  fn id(&self) -> &str {
    &self.id
  }

  async fn execute(&self, state: ChainState) -> ChainState {
    for attempt in 1..=self.max_retries {
      if attempt > 1 {
        tokio::time::sleep(self.retry_delay).await;
      }
      let prompt = template::render(&self.prompt, &state);
      let text = match self
        .service
        .generate_with_state(&self.settings, &prompt, &state)
        .await
      {
        Ok(text) => text,
        Err(e) => {
          warn!(link = %self.id, attempt, error = %e, "completion failed");
          continue;
        }
      };
      match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => {
          info!(link = %self.id, attempt, keys = map.len(), "object extracted");
          let mut next = state;
          for (key, value) in &map {
            next.insert(key.clone(), property_text(value));
          }
          return next;
        }
        Ok(_) => {
          warn!(link = %self.id, attempt, "top-level JSON value is not an object");
        }
        Err(e) => {
          warn!(link = %self.id, attempt, error = %e, "response is not valid JSON");
        }
      }
    }
    warn!(link = %self.id, attempts = self.max_retries, "retries exhausted, state unchanged");
    state
  }

  fn writes(&self) -> Vec<String> {
    self
      .settings
      .schema
      .as_ref()
      .map(|s| s.key_names().map(str::to_string).collect())
      .unwrap_or_default()
  }
}

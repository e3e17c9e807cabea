//! Completion link: one free-text LLM call per execution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::service::CompletionService;
use crate::template;
use crate::types::{ANSWER_KEY, ChainState, ModelSettings};

use super::ChainLink;

/// Link that issues one free-text completion and stores the raw response
/// under the reserved `answer` key. On any service failure the state is
/// forwarded unchanged; downstream steps degrade instead of the chain
/// aborting.
pub struct CompletionLink {
  id: String,
  settings: ModelSettings,
  prompt: String,
  service: Arc<dyn CompletionService>,
}

impl CompletionLink {
  pub fn new(
    id: impl Into<String>,
    settings: ModelSettings,
    prompt: impl Into<String>,
    service: Arc<dyn CompletionService>,
  ) -> Self {
    Self {
      id: id.into(),
      settings,
      prompt: prompt.into(),
      service,
    }
  }
}

#[async_trait]
impl ChainLink for CompletionLink {
  fn id(&self) -> &str {
    &self.id
  }

  async fn execute(&self, state: ChainState) -> ChainState {
    let prompt = template::render(&self.prompt, &state);
    match self
      .service
      .generate_with_state(&self.settings, &prompt, &state)
      .await
    {
      Ok(text) => {
        info!(link = %self.id, chars = text.len(), "completion stored");
        let mut next = state;
        next.insert(ANSWER_KEY.to_string(), text);
        next
      }
      Err(e) => {
        warn!(link = %self.id, error = %e, "completion failed, state unchanged");
        state
      }
    }
  }

  fn writes(&self) -> Vec<String> {
    vec![ANSWER_KEY.to_string()]
  }
}

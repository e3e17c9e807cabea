//! Pipeline definition: an ordered list of step descriptors.

use serde::{Deserialize, Serialize};

use super::ModelSettings;

/// A full pipeline definition, loaded from a JSON asset. Immutable during a
/// run; the executor builds one link per step in declared order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDefinition {
  pub name: String,
  #[serde(default)]
  pub steps: Vec<StepConfig>,
}

impl PipelineDefinition {
  /// True if any step issues LLM calls (and therefore needs a service).
  pub fn has_llm_steps(&self) -> bool {
    self
      .steps
      .iter()
      .any(|s| !matches!(s.kind, StepKind::Custom { .. }))
  }
}

/// One step of a pipeline: an id plus the link kind and its configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
  pub id: String,
  #[serde(flatten)]
  pub kind: StepKind,
}

/// Link kind and per-kind configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
  /// Free-text completion; raw response lands under the `answer` key.
  Completion {
    settings: ModelSettings,
    /// User-prompt template rendered against state before the call.
    prompt: String,
  },
  /// JSON extraction with retry; top-level properties merge into state.
  JsonExtraction {
    settings: ModelSettings,
    /// User-prompt template rendered against state before each attempt.
    prompt: String,
    /// Maximum total attempts; clamped to at least 1 at link construction.
    #[serde(default = "default_max_retries")]
    max_retries: u32,
    /// Delay between attempts in seconds; clamped to at least 0.
    #[serde(default)]
    retry_delay_secs: f32,
  },
  /// Deterministic transform resolved through the link registry.
  Custom { type_id: String },
}

fn default_max_retries() -> u32 {
  3
}

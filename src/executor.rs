//! Sequential chain executor: runs an ordered list of links, threading state
//! from one to the next.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::ChainError;
use crate::links::{ChainLink, CompletionLink, JsonExtractionLink, LinkRegistry};
use crate::service::CompletionService;
use crate::types::{ChainState, PipelineDefinition, StepKind};

/// Final result of running a chain: the last link's output state plus the
/// ids of all executed links in order.
///
/// There is no failed variant. Link-level failures are absorbed locally and
/// logged; a chain always completes with whatever state survived, and callers
/// detect degraded runs by the absence of expected keys.
#[derive(Debug, Clone)]
pub struct ChainResult {
  pub state: ChainState,
  pub completed_links: Vec<String>,
}

/// Runs links in declared order, exactly once each. The state map is owned
/// by the executor for the lifetime of one run and moved into each link in
/// turn: strictly sequential handoff, one link in flight at a time.
pub struct ChainExecutor {
  links: Vec<Box<dyn ChainLink>>,
}

impl std::fmt::Debug for ChainExecutor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ChainExecutor")
      .field("links", &self.links.len())
      .finish()
  }
}

impl ChainExecutor {
  pub fn new(links: Vec<Box<dyn ChainLink>>) -> Self {
    Self { links }
  }

  /// Builds an executor from a pipeline definition.
  ///
  /// The completion service is injected here and shared by every LLM link.
  /// Fails with [ChainError::ServiceUnavailable] when the definition has LLM
  /// steps but no service was supplied, and [ChainError::ConfigurationMissing]
  /// for a custom `type_id` absent from the registry.
  pub fn from_definition(
    def: &PipelineDefinition,
    service: Option<Arc<dyn CompletionService>>,
    registry: &LinkRegistry,
  ) -> Result<Self, ChainError> {
    if def.has_llm_steps() && service.is_none() {
      return Err(ChainError::ServiceUnavailable(def.name.clone()));
    }
    let mut links: Vec<Box<dyn ChainLink>> = Vec::with_capacity(def.steps.len());
    for step in &def.steps {
      match &step.kind {
        StepKind::Completion { settings, prompt } => {
          let service = service.clone().ok_or_else(|| {
            ChainError::ServiceUnavailable(def.name.clone())
          })?;
          links.push(Box::new(CompletionLink::new(
            &step.id,
            settings.clone(),
            prompt,
            service,
          )));
        }
        StepKind::JsonExtraction {
          settings,
          prompt,
          max_retries,
          retry_delay_secs,
        } => {
          let service = service.clone().ok_or_else(|| {
            ChainError::ServiceUnavailable(def.name.clone())
          })?;
          links.push(Box::new(JsonExtractionLink::new(
            &step.id,
            settings.clone(),
            prompt,
            *max_retries,
            *retry_delay_secs,
            service,
          )));
        }
        StepKind::Custom { type_id } => {
          let link = registry.create(type_id, &step.id).ok_or_else(|| {
            ChainError::ConfigurationMissing(format!(
              "no custom link registered for type id '{}' (step '{}')",
              type_id, step.id
            ))
          })?;
          links.push(link);
        }
      }
    }
    Ok(Self::new(links))
  }

  pub fn len(&self) -> usize {
    self.links.len()
  }

  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  /// Runs the chain on an initial state. Invokes exactly one `execute` per
  /// link, in declared order; each link's output replaces the current state.
  /// Always resolves; the resolved future is the completion callback.
  #[instrument(level = "trace", skip(self, initial))]
  pub async fn run(&self, initial: ChainState) -> ChainResult {
    let mut state = initial;
    let mut completed = Vec::with_capacity(self.links.len());
    for (index, link) in self.links.iter().enumerate() {
      info!(link = %link.id(), index, "executing link");
      state = link.execute(state).await;
      completed.push(link.id().to_string());
    }
    info!(completed = ?completed, "chain complete");
    ChainResult {
      state,
      completed_links: completed,
    }
  }
}

//! Tests for `executor`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ChainError;
use crate::executor::ChainExecutor;
use crate::links::{ChainLink, FnLink, LinkRegistry};
use crate::service::{ChatMessage, CompletionService};
use crate::types::{
  ChainState, ModelSettings, PipelineDefinition, StepConfig, StepKind,
};

struct NullService;

#[async_trait]
impl CompletionService for NullService {
  async fn generate(&self, _: &ModelSettings, _: &str) -> Result<String, ChainError> {
    Ok(String::new())
  }

  async fn generate_with_state(
    &self,
    _: &ModelSettings,
    _: &str,
    _: &ChainState,
  ) -> Result<String, ChainError> {
    Ok(String::new())
  }

  async fn chat(&self, _: &ModelSettings, _: &[ChatMessage]) -> Result<String, ChainError> {
    Ok(String::new())
  }

  async fn embed(&self, _: &ModelSettings, _: &[String]) -> Result<Vec<Vec<f32>>, ChainError> {
    Ok(vec![])
  }
}

fn tracking_link(id: &str, log: Arc<Mutex<Vec<String>>>) -> Box<dyn ChainLink> {
  let id_owned = id.to_string();
  Box::new(FnLink::new(id, move |mut state: ChainState| {
    log.lock().expect("log").push(id_owned.clone());
    state.insert(format!("visited_{}", id_owned), "1".to_string());
    state
  }))
}

#[tokio::test]
async fn runs_all_links_in_declared_order() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let executor = ChainExecutor::new(vec![
    tracking_link("a", log.clone()),
    tracking_link("b", log.clone()),
    tracking_link("c", log.clone()),
  ]);
  let result = executor.run(ChainState::new()).await;
  assert_eq!(
    log.lock().expect("log").as_slice(),
    &["a".to_string(), "b".to_string(), "c".to_string()]
  );
  assert_eq!(
    result.completed_links,
    vec!["a".to_string(), "b".to_string(), "c".to_string()]
  );
  assert!(result.state.contains_key("visited_a"));
  assert!(result.state.contains_key("visited_c"));
}

#[tokio::test]
async fn result_carries_last_link_output() {
  let executor = ChainExecutor::new(vec![
    Box::new(FnLink::new("set", |mut s: ChainState| {
      s.insert("k".to_string(), "first".to_string());
      s
    })),
    Box::new(FnLink::new("overwrite", |mut s: ChainState| {
      s.insert("k".to_string(), "second".to_string());
      s
    })),
  ]);
  let result = executor.run(ChainState::new()).await;
  assert_eq!(result.state.get("k").map(String::as_str), Some("second"));
}

#[tokio::test]
async fn empty_chain_returns_initial_state() {
  let executor = ChainExecutor::new(vec![]);
  assert!(executor.is_empty());
  let mut initial = ChainState::new();
  initial.insert("seed".to_string(), "x".to_string());
  let result = executor.run(initial.clone()).await;
  assert_eq!(result.state, initial);
  assert!(result.completed_links.is_empty());
}

fn llm_definition() -> PipelineDefinition {
  PipelineDefinition {
    name: "item_stats".to_string(),
    steps: vec![
      StepConfig {
        id: "describe".to_string(),
        kind: StepKind::Completion {
          settings: ModelSettings::new("test-model"),
          prompt: "Describe {{item}}".to_string(),
        },
      },
      StepConfig {
        id: "clean".to_string(),
        kind: StepKind::Custom {
          type_id: "strip_code_fences".to_string(),
        },
      },
    ],
  }
}

#[test]
fn from_definition_builds_one_link_per_step() {
  let executor = ChainExecutor::from_definition(
    &llm_definition(),
    Some(Arc::new(NullService)),
    &LinkRegistry::with_builtins(),
  )
  .expect("build");
  assert_eq!(executor.len(), 2);
}

#[test]
fn from_definition_without_service_fails_for_llm_steps() {
  let err = ChainExecutor::from_definition(
    &llm_definition(),
    None,
    &LinkRegistry::with_builtins(),
  )
  .expect_err("should fail");
  assert!(matches!(err, ChainError::ServiceUnavailable(name) if name == "item_stats"));
}

#[test]
fn from_definition_without_service_ok_for_custom_only() {
  let def = PipelineDefinition {
    name: "cleanup".to_string(),
    steps: vec![StepConfig {
      id: "clean".to_string(),
      kind: StepKind::Custom {
        type_id: "strip_code_fences".to_string(),
      },
    }],
  };
  let executor = ChainExecutor::from_definition(&def, None, &LinkRegistry::with_builtins())
    .expect("custom-only chain needs no service");
  assert_eq!(executor.len(), 1);
}

#[test]
fn from_definition_unknown_custom_type_fails() {
  let def = PipelineDefinition {
    name: "broken".to_string(),
    steps: vec![StepConfig {
      id: "x".to_string(),
      kind: StepKind::Custom {
        type_id: "unregistered".to_string(),
      },
    }],
  };
  let err = ChainExecutor::from_definition(&def, None, &LinkRegistry::new())
    .expect_err("should fail");
  assert!(matches!(err, ChainError::ConfigurationMissing(msg) if msg.contains("unregistered")));
}

#[tokio::test]
async fn from_definition_chain_executes_end_to_end() {
  let def = llm_definition();
  let executor = ChainExecutor::from_definition(
    &def,
    Some(Arc::new(NullService)),
    &LinkRegistry::with_builtins(),
  )
  .expect("build");
  let mut initial = ChainState::new();
  initial.insert("item".to_string(), "dagger".to_string());
  let result = executor.run(initial).await;
  assert_eq!(
    result.completed_links,
    vec!["describe".to_string(), "clean".to_string()]
  );
  // NullService returns empty text; the answer key still lands.
  assert_eq!(result.state.get("answer").map(String::as_str), Some(""));
}

//! State dependency analyzer: static read/write classification over a
//! pipeline definition. Feeds editor tooling and the CLI `--analyze` view;
//! the executor never consults it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::links::LinkRegistry;
use crate::template;
use crate::types::{ANSWER_KEY, PipelineDefinition, StepKind};

/// Classification of one observed state key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
  /// Read somewhere, never written; must come from the initial state.
  Input,
  /// Written and read downstream of a write.
  Intermediate,
  /// Written somewhere, never read downstream of a write.
  Output,
}

/// Where one key is read and written, plus its classification.
#[derive(Debug, Clone, Serialize)]
pub struct KeyUsage {
  pub role: KeyRole,
  /// Step indices whose templates reference the key.
  pub read_by: Vec<usize>,
  /// Step indices that may write the key.
  pub written_by: Vec<usize>,
}

/// Read-only report over one pipeline definition. Rebuilt from scratch on
/// every analysis pass; keyed by state key for deterministic ordering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StateReport {
  pub keys: BTreeMap<String, KeyUsage>,
}

impl StateReport {
  /// Keys the pipeline expects in the initial state.
  pub fn inputs(&self) -> Vec<&str> {
    self.keys_with_role(KeyRole::Input)
  }

  /// Keys the pipeline produces for its caller.
  pub fn outputs(&self) -> Vec<&str> {
    self.keys_with_role(KeyRole::Output)
  }

  fn keys_with_role(&self, role: KeyRole) -> Vec<&str> {
    self
      .keys
      .iter()
      .filter(|(_, usage)| usage.role == role)
      .map(|(key, _)| key.as_str())
      .collect()
  }
}

/// Keys a step's templates read: placeholders in the user prompt and the
/// settings' system template.
fn step_reads(kind: &StepKind) -> Vec<String> {
  let (prompt, system) = match kind {
    StepKind::Completion { settings, prompt } | StepKind::JsonExtraction { settings, prompt, .. } => {
      (prompt.as_str(), settings.system_prompt.as_deref())
    }
    // Custom links read programmatically; nothing to scan.
    StepKind::Custom { .. } => return Vec::new(),
  };
  let mut keys = template::placeholders(prompt);
  if let Some(system) = system {
    for key in template::placeholders(system) {
      if !keys.contains(&key) {
        keys.push(key);
      }
    }
  }
  keys
}

/// Keys a step may write: the reserved `answer` key for completion steps,
/// declared schema properties for extraction steps, and the created link's
/// declared write-set for custom steps.
fn step_writes(kind: &StepKind, step_id: &str, registry: &LinkRegistry) -> Vec<String> {
  match kind {
    StepKind::Completion { .. } => vec![ANSWER_KEY.to_string()],
    StepKind::JsonExtraction { settings, .. } => settings
      .schema
      .as_ref()
      .map(|s| s.key_names().map(str::to_string).collect())
      .unwrap_or_default(),
    StepKind::Custom { type_id } => registry
      .create(type_id, step_id)
      .map(|link| link.writes())
      .unwrap_or_default(),
  }
}

/// Two-pass dataflow analysis over a pipeline definition.
///
/// Pass one collects per-step read and write sets; pass two classifies every
/// observed key. No cycles are possible: the pipeline is a strict linear
/// sequence.
pub fn analyze(def: &PipelineDefinition, registry: &LinkRegistry) -> StateReport {
  let mut keys: BTreeMap<String, KeyUsage> = BTreeMap::new();

  for (index, step) in def.steps.iter().enumerate() {
    for key in step_reads(&step.kind) {
      usage(&mut keys, key).read_by.push(index);
    }
    for key in step_writes(&step.kind, &step.id, registry) {
      usage(&mut keys, key).written_by.push(index);
    }
  }

  for entry in keys.values_mut() {
    entry.role = classify(&entry.read_by, &entry.written_by);
  }

  StateReport { keys }
}

fn usage<'a>(keys: &'a mut BTreeMap<String, KeyUsage>, key: String) -> &'a mut KeyUsage {
  keys.entry(key).or_insert(KeyUsage {
    role: KeyRole::Input,
    read_by: Vec::new(),
    written_by: Vec::new(),
  })
}

fn classify(read_by: &[usize], written_by: &[usize]) -> KeyRole {
  if written_by.is_empty() {
    return KeyRole::Input;
  }
  let read_downstream = written_by
    .iter()
    .any(|w| read_by.iter().any(|r| r > w));
  if read_downstream {
    KeyRole::Intermediate
  } else {
    KeyRole::Output
  }
}

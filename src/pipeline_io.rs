//! Pipeline definition and state save/load (JSON).

use std::path::Path;

use tracing::instrument;

use crate::types::{ChainState, PipelineDefinition};

fn invalid_data(e: serde_json::Error) -> std::io::Error {
  std::io::Error::new(std::io::ErrorKind::InvalidData, e)
}

/// Loads a pipeline definition from `path`. Returns error if the file is
/// missing or invalid JSON.
#[instrument(level = "trace", skip(path))]
pub fn load_definition(path: &Path) -> Result<PipelineDefinition, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes).map_err(invalid_data)
}

/// Saves a pipeline definition to `path` as pretty JSON.
#[instrument(level = "trace", skip(path, def))]
pub fn save_definition(path: &Path, def: &PipelineDefinition) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(def).map_err(invalid_data)?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a chain state map from `path`.
#[instrument(level = "trace", skip(path))]
pub fn load_state(path: &Path) -> Result<ChainState, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes).map_err(invalid_data)
}

/// Saves a chain state map to `path` as pretty JSON.
#[instrument(level = "trace", skip(path, state))]
pub fn save_state(path: &Path, state: &ChainState) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(state).map_err(invalid_data)?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

//! Data types for prompt-chain pipelines.
//!
//! Pipeline definitions are loaded from JSON assets; everything here is plain
//! serde data that the executor and analyzer consume.

use std::collections::HashMap;

mod model_settings;
mod pipeline;
mod schema;
#[cfg(test)]
mod schema_test;

pub use model_settings::{ModelSettings, SamplingOptions};
pub use pipeline::{PipelineDefinition, StepConfig, StepKind};
pub use schema::{FieldKind, ResponseSchema, SchemaField};

/// Key-value state threaded through one chain run.
pub type ChainState = HashMap<String, String>;

/// Reserved state key holding the raw text of the latest completion call.
pub const ANSWER_KEY: &str = "answer";

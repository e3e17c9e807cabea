//! # statweave
//!
//! Sequential LLM prompt chains for procedural game content.
//!
//! A chain threads a flat string-keyed state map through an ordered list of
//! links: free-text completion calls, JSON-extraction calls with retry, and
//! deterministic custom transforms. The production backend is a local Ollama
//! instance; the completion service is an injected collaborator, so chains
//! run against scripted fakes in tests.
//!
//! ## Architecture
//!
//! - [executor::ChainExecutor] runs the links (see `links` module) in
//!   declared order, one at a time.
//! - [analyzer::analyze] classifies every state key a pipeline touches as
//!   input, intermediate, or output (editor tooling, not the runtime path).
//! - Pipeline definitions are JSON assets (see [pipeline_io]).

pub mod analyzer;
pub mod error;
pub mod executor;
#[cfg(test)]
mod executor_test;
pub mod links;
pub mod ollama;
pub mod pipeline_io;
pub mod service;
pub mod template;
#[cfg(test)]
mod template_test;
pub mod types;

pub use analyzer::{KeyRole, KeyUsage, StateReport, analyze};
pub use error::ChainError;
pub use executor::{ChainExecutor, ChainResult};
pub use links::{ChainLink, CompletionLink, FnLink, JsonExtractionLink, LinkRegistry};
pub use ollama::{DEFAULT_OLLAMA_URL, OllamaClient};
pub use service::{ChatMessage, CompletionService};
pub use types::{ANSWER_KEY, ChainState, ModelSettings, PipelineDefinition};

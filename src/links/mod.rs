//! Chain links: the pluggable units of pipeline work.

use async_trait::async_trait;

use crate::types::ChainState;

mod completion;
mod custom;
mod json_extraction;
mod registry;
#[cfg(test)]
mod registry_test;

pub use completion::CompletionLink;
pub use custom::{FnLink, StripCodeFencesLink};
pub use json_extraction::JsonExtractionLink;
pub use registry::LinkRegistry;

/// One unit of pipeline work. Takes the current state by value and returns
/// the state to hand to the next link, possibly the input unchanged when the
/// link declines (or fails) to enrich it.
///
/// Execution never fails at this boundary: links absorb their own errors and
/// log them, so the executor always runs the full chain.
#[async_trait]
pub trait ChainLink: Send + Sync {
  /// Step id, unique within one pipeline.
  fn id(&self) -> &str;

  /// Executes the link, threading state through.
  async fn execute(&self, state: ChainState) -> ChainState;

  /// State keys this link may write. Static analysis only, not enforced at
  /// runtime.
  fn writes(&self) -> Vec<String> {
    Vec::new()
  }
}

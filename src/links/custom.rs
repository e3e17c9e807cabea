//! Deterministic custom links.

use async_trait::async_trait;
use tracing::debug;

use crate::types::{ANSWER_KEY, ChainState};

use super::ChainLink;

/// Custom link wrapping a plain function. The usual way to plug a
/// deterministic transform into a chain.
pub struct FnLink {
  id: String,
  writes: Vec<String>,
  f: Box<dyn Fn(ChainState) -> ChainState + Send + Sync>,
}

impl FnLink {
  pub fn new(
    id: impl Into<String>,
    f: impl Fn(ChainState) -> ChainState + Send + Sync + 'static,
  ) -> Self {
    Self {
      id: id.into(),
      writes: Vec::new(),
      f: Box::new(f),
    }
  }

  /// Declares the keys this link may write, for the dependency analyzer.
  pub fn with_writes(mut self, writes: impl IntoIterator<Item = impl Into<String>>) -> Self {
    self.writes = writes.into_iter().map(Into::into).collect();
    self
  }
}

#[async_trait]
impl ChainLink for FnLink {
  fn id(&self) -> &str {
    &self.id
  }

  async fn execute(&self, state: ChainState) -> ChainState {
    (self.f)(state)
  }

  fn writes(&self) -> Vec<String> {
    self.writes.clone()
  }
}

/// Strips Markdown code fences from the `answer` key, in place.
///
/// Local models often wrap JSON in ``` fences even when told not to; running
/// this between a completion and an extraction step keeps the raw text
/// parseable downstream.
pub struct StripCodeFencesLink {
  id: String,
}

impl StripCodeFencesLink {
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into() }
  }
}

/// Removes a leading ``` fence (with optional language tag) and a trailing
/// ``` fence. Text without fences is returned unchanged.
pub(crate) fn strip_code_fences(text: &str) -> String {
  let trimmed = text.trim();
  let Some(rest) = trimmed.strip_prefix("```") else {
    return text.to_string();
  };
  let rest = match rest.find('\n') {
    Some(idx) => &rest[idx + 1..],
    None => rest,
  };
  let rest = rest.strip_suffix("```").unwrap_or(rest);
  rest.trim().to_string()
}

#[async_trait]
impl ChainLink for StripCodeFencesLink {
  fn id(&self) -> &str {
    &self.id
  }

  async fn execute(&self, state: ChainState) -> ChainState {
    let mut next = state;
    if let Some(answer) = next.get(ANSWER_KEY) {
      let cleaned = strip_code_fences(answer);
      debug!(link = %self.id, chars = cleaned.len(), "answer cleaned");
      next.insert(ANSWER_KEY.to_string(), cleaned);
    }
    next
  }

  fn writes(&self) -> Vec<String> {
    vec![ANSWER_KEY.to_string()]
  }
}

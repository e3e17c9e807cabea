//! Registry mapping custom-link type ids to factories.
//!
//! Custom steps name a `type_id` in the pipeline definition; the registry
//! resolves it to a factory populated at startup. An explicit map, so the
//! set of constructible links is visible and closed.

use std::collections::HashMap;

use super::{ChainLink, StripCodeFencesLink};

type LinkFactory = Box<dyn Fn(&str) -> Box<dyn ChainLink> + Send + Sync>;

/// Factory map for custom links, keyed by type id. Factories receive the
/// step id so the created link reports it.
#[derive(Default)]
pub struct LinkRegistry {
  factories: HashMap<String, LinkFactory>,
}

impl LinkRegistry {
  /// Empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registry pre-populated with the links shipped by this crate.
  pub fn with_builtins() -> Self {
    let mut registry = Self::new();
    registry.register("strip_code_fences", |step_id| {
      Box::new(StripCodeFencesLink::new(step_id))
    });
    registry
  }

  /// Registers a factory under a type id, replacing any previous entry.
  pub fn register(
    &mut self,
    type_id: impl Into<String>,
    factory: impl Fn(&str) -> Box<dyn ChainLink> + Send + Sync + 'static,
  ) {
    self.factories.insert(type_id.into(), Box::new(factory));
  }

  /// Creates the link registered under `type_id`, or None if unregistered.
  pub fn create(&self, type_id: &str, step_id: &str) -> Option<Box<dyn ChainLink>> {
    self.factories.get(type_id).map(|f| f(step_id))
  }

  pub fn contains(&self, type_id: &str) -> bool {
    self.factories.contains_key(type_id)
  }

  /// Registered type ids, sorted.
  pub fn type_ids(&self) -> Vec<&str> {
    let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
  }
}

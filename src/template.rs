//! Prompt template rendering: `{{key}}` substitution from chain state.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::instrument;

use crate::types::ChainState;

static PLACEHOLDER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder regex"));

/// Renders a template against state: every literal `{{key}}` is replaced by
/// the state value; keys absent from state are left verbatim.
///
/// One pass over the template: substituted values are never re-scanned, so
/// there is no recursive substitution and no escaping. Never fails.
#[instrument(level = "trace", skip(template, state))]
pub fn render(template: &str, state: &ChainState) -> String {
  PLACEHOLDER
    .replace_all(template, |caps: &Captures| match state.get(&caps[1]) {
      Some(value) => value.clone(),
      None => caps[0].to_string(),
    })
    .into_owned()
}

/// Distinct `{{key}}` names referenced by a template, in first-occurrence
/// order. Used by the dependency analyzer.
pub fn placeholders(template: &str) -> Vec<String> {
  let mut keys = Vec::new();
  for caps in PLACEHOLDER.captures_iter(template) {
    let key = &caps[1];
    if !keys.iter().any(|k| k == key) {
      keys.push(key.to_string());
    }
  }
  keys
}

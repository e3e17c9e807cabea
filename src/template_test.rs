//! Tests for `template`.

use proptest::prelude::*;

use crate::template::{placeholders, render};
use crate::types::ChainState;

fn state(pairs: &[(&str, &str)]) -> ChainState {
  pairs
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn render_replaces_known_keys() {
  let s = state(&[("name", "Kang"), ("hp", "42")]);
  assert_eq!(
    render("Hello {{name}}, you have {{hp}} HP", &s),
    "Hello Kang, you have 42 HP"
  );
}

#[test]
fn render_leaves_missing_keys_verbatim() {
  let s = state(&[("name", "Kang")]);
  assert_eq!(
    render("Hello {{name}}, you have {{hp}} HP", &s),
    "Hello Kang, you have {{hp}} HP"
  );
}

#[test]
fn render_empty_state_returns_template() {
  let s = ChainState::new();
  assert_eq!(render("{{a}} and {{b}}", &s), "{{a}} and {{b}}");
}

#[test]
fn render_does_not_resubstitute_values() {
  // A substituted value containing a placeholder is emitted as-is.
  let s = state(&[("a", "{{b}}"), ("b", "deep")]);
  assert_eq!(render("{{a}}", &s), "{{b}}");
}

#[test]
fn render_repeated_placeholder() {
  let s = state(&[("x", "7")]);
  assert_eq!(render("{{x}}+{{x}}={{x}}{{x}}", &s), "7+7=77");
}

#[test]
fn render_no_placeholders_is_identity() {
  let s = state(&[("x", "7")]);
  assert_eq!(render("plain text", &s), "plain text");
}

#[test]
fn placeholders_first_occurrence_order_deduped() {
  assert_eq!(
    placeholders("{{b}} {{a}} {{b}} {{c}}"),
    vec!["b".to_string(), "a".to_string(), "c".to_string()]
  );
}

#[test]
fn placeholders_empty_for_plain_text() {
  assert!(placeholders("no keys here").is_empty());
}

#[test]
fn placeholders_ignores_unbalanced_braces() {
  assert!(placeholders("{{open but never closed").is_empty());
  assert_eq!(placeholders("}} {{k}} {{"), vec!["k".to_string()]);
}

proptest! {
  #[test]
  fn render_never_panics(template in ".*", key in "[a-z]{1,8}", value in ".*") {
    let s = state(&[(key.as_str(), value.as_str())]);
    let _ = render(&template, &s);
  }

  #[test]
  fn render_without_braces_is_identity(template in "[^{}]*", key in "[a-z]{1,8}", value in ".*") {
    let s = state(&[(key.as_str(), value.as_str())]);
    prop_assert_eq!(render(&template, &s), template);
  }

  #[test]
  fn placeholders_never_panics(template in ".*") {
    let _ = placeholders(&template);
  }
}

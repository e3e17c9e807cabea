//! Tests for `registry`.

use crate::links::{FnLink, LinkRegistry};

#[test]
fn create_returns_registered_link_with_step_id() {
  let mut registry = LinkRegistry::new();
  registry.register("noop", |step_id| Box::new(FnLink::new(step_id, |s| s)));
  let link = registry.create("noop", "step3").expect("registered");
  assert_eq!(link.id(), "step3");
}

#[test]
fn create_unknown_type_returns_none() {
  let registry = LinkRegistry::new();
  assert!(registry.create("missing", "step").is_none());
  assert!(!registry.contains("missing"));
}

#[test]
fn register_replaces_previous_entry() {
  let mut registry = LinkRegistry::new();
  registry.register("t", |id| Box::new(FnLink::new(id, |s| s).with_writes(["first"])));
  registry.register("t", |id| Box::new(FnLink::new(id, |s| s).with_writes(["second"])));
  let link = registry.create("t", "s").expect("registered");
  assert_eq!(link.writes(), vec!["second".to_string()]);
}

#[test]
fn builtins_include_strip_code_fences() {
  let registry = LinkRegistry::with_builtins();
  assert!(registry.contains("strip_code_fences"));
  let link = registry.create("strip_code_fences", "clean").expect("builtin");
  assert_eq!(link.id(), "clean");
}

#[test]
fn type_ids_sorted() {
  let mut registry = LinkRegistry::with_builtins();
  registry.register("a_first", |id| Box::new(FnLink::new(id, |s| s)));
  let ids = registry.type_ids();
  assert_eq!(ids, vec!["a_first", "strip_code_fences"]);
}

//! Tests for `schema`.

use serde_json::json;

use super::schema::{FieldKind, ResponseSchema, SchemaField};

fn stats_schema() -> ResponseSchema {
  let mut attack = SchemaField::new("Attack", FieldKind::Number);
  attack.hint = Some("0-100".to_string());
  ResponseSchema::new(vec![
    attack,
    SchemaField::new("Name", FieldKind::String),
    SchemaField::new("Cursed", FieldKind::Boolean),
  ])
}

#[test]
fn key_names_in_declaration_order() {
  let schema = stats_schema();
  let names: Vec<&str> = schema.key_names().collect();
  assert_eq!(names, vec!["Attack", "Name", "Cursed"]);
}

#[test]
fn format_instructions_lists_fields() {
  let text = stats_schema().format_instructions();
  assert!(text.starts_with("Respond with a single JSON object"));
  assert!(text.contains("- \"Attack\" (number): 0-100"));
  assert!(text.contains("- \"Name\" (string)"));
  assert!(text.contains("- \"Cursed\" (boolean)"));
}

#[test]
fn field_kind_defaults_to_string() {
  let field: SchemaField = serde_json::from_value(json!({"name": "Lore"})).expect("parse");
  assert_eq!(field.kind, FieldKind::String);
  assert!(field.hint.is_none());
}

#[test]
fn field_kind_parses_snake_case() {
  let field: SchemaField =
    serde_json::from_value(json!({"name": "Attack", "kind": "number"})).expect("parse");
  assert_eq!(field.kind, FieldKind::Number);
}

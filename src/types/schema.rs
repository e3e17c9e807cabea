//! Expected shape of a JSON-extraction response.

use serde::{Deserialize, Serialize};

/// Declared top-level properties of the JSON object an extraction step
/// expects. Drives the format instructions appended to the system context and
/// the analyzer's written-key sets; never enforced at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchema {
  pub fields: Vec<SchemaField>,
}

impl ResponseSchema {
  pub fn new(fields: Vec<SchemaField>) -> Self {
    Self { fields }
  }

  /// Names of the declared properties, in declaration order.
  pub fn key_names(&self) -> impl Iterator<Item = &str> {
    self.fields.iter().map(|f| f.name.as_str())
  }

  /// Instruction block describing the expected object, appended to the
  /// system context of extraction calls.
  pub fn format_instructions(&self) -> String {
    let mut out = String::from("Respond with a single JSON object and nothing else. Properties:");
    for field in &self.fields {
      out.push_str("\n- \"");
      out.push_str(&field.name);
      out.push_str("\" (");
      out.push_str(field.kind.as_str());
      out.push(')');
      if let Some(ref hint) = field.hint {
        out.push_str(": ");
        out.push_str(hint);
      }
    }
    out
  }
}

/// One expected top-level property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
  pub name: String,
  #[serde(default)]
  pub kind: FieldKind,
  /// Free-text hint shown to the model (e.g. value range).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hint: Option<String>,
}

impl SchemaField {
  pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
    Self {
      name: name.into(),
      kind,
      hint: None,
    }
  }
}

/// JSON value kind of an expected property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
  #[default]
  String,
  Number,
  Boolean,
}

impl FieldKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      FieldKind::String => "string",
      FieldKind::Number => "number",
      FieldKind::Boolean => "boolean",
    }
  }
}

//! Field validation for dog writes.
//!
//! Validation never fails; it returns the list of human-readable problems,
//! empty when the submission is acceptable.

use serde_json::{Map, Value};

/// The only keys a client may submit on create or update.
pub const ALLOWED_KEYS: [&str; 4] = ["name", "breed", "age", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every field is checked; a missing field fails its type rule.
    Strict,
    /// Only present, truthy fields are checked.
    Partial,
}

#[derive(Clone, Copy)]
enum FieldType {
    String,
    Number,
}

impl FieldType {
    fn matches(self, value: Option<&Value>) -> bool {
        match self {
            FieldType::String => matches!(value, Some(Value::String(_))),
            FieldType::Number => matches!(value, Some(Value::Number(_))),
        }
    }

    fn label(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
        }
    }
}

const FIELD_RULES: [(&str, FieldType); 4] = [
    ("name", FieldType::String),
    ("breed", FieldType::String),
    ("age", FieldType::Number),
    ("description", FieldType::String),
];

/// JSON truthiness: `null`, `false`, zero and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Check submitted fields against the allow-list and the per-field type rules.
///
/// Unknown keys are reported first, in submission order, followed by type
/// errors in `name, breed, age, description` order.
pub fn validate_fields(fields: &Map<String, Value>, mode: ValidationMode) -> Vec<String> {
    let mut errors: Vec<String> = fields
        .keys()
        .filter(|key| !ALLOWED_KEYS.contains(&key.as_str()))
        .map(|key| format!("'{key}' is not a valid key"))
        .collect();

    for (field, ty) in FIELD_RULES {
        let value = fields.get(field);

        let checked = match mode {
            ValidationMode::Strict => true,
            ValidationMode::Partial => value.is_some_and(is_truthy),
        };

        if checked && !ty.matches(value) {
            errors.push(format!("{field} should be a {}", ty.label()));
        }
    }

    errors
}

//! Structural checks for JSON request bodies
//!
//! serde stops at the first missing, unknown, or mistyped field. The
//! checks here walk the raw `Value` instead and report every structural
//! problem, so `ValidatedJson` can answer with one complete list.

use serde_json::{Map, Value};

/// JSON type a body field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Integer that fits in an `i32`
    Integer,
    /// Number, or a string holding one
    Decimal,
}

impl FieldKind {
    fn type_name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "number,string",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::Integer, Value::Number(n)) => {
                n.as_i64().is_some_and(|i| i32::try_from(i).is_ok())
            }
            (FieldKind::Decimal, Value::Number(_)) => true,
            (FieldKind::Decimal, Value::String(s)) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        }
    }

    /// Stand-in for a missing or mistyped field. Lets the remaining
    /// fields reach value validation; never stored.
    fn placeholder(self) -> Value {
        match self {
            FieldKind::String => Value::String("x".to_string()),
            FieldKind::Integer | FieldKind::Decimal => Value::from(0),
        }
    }
}

/// One declared body field, by its wire (camelCase) name
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
        }
    }

    /// Optional, and an explicit `null` is allowed
    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: true,
        }
    }
}

/// Declared shape of a JSON object body. Undeclared properties are rejected.
pub trait RequestSchema {
    const FIELDS: &'static [Field];
}

/// Outcome of [`check`]
#[derive(Debug)]
pub struct Checked {
    /// Structural problems, in field declaration order then unknown keys
    pub errors: Vec<String>,
    /// The body with unknown keys removed and missing or mistyped fields
    /// replaced by placeholders
    pub repaired: Value,
}

/// Check `value` against `fields`
pub fn check(value: Value, fields: &[Field]) -> Checked {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Checked {
                errors: vec![format!(
                    "instance is not of a type(s) object, got {}",
                    json_type(&other)
                )],
                repaired: Value::Object(placeholders(fields)),
            }
        }
    };

    let mut errors = Vec::new();

    for field in fields {
        let problem = match object.get(field.name) {
            None if field.required => {
                Some(format!("instance requires property \"{}\"", field.name))
            }
            None => None,
            Some(Value::Null) if field.nullable => None,
            Some(value) if field.kind.accepts(value) => None,
            Some(_) => Some(format!(
                "instance.{} is not of a type(s) {}",
                field.name,
                field.kind.type_name()
            )),
        };

        if let Some(problem) = problem {
            errors.push(problem);
            if field.required {
                object.insert(field.name.to_string(), field.kind.placeholder());
            } else {
                object.remove(field.name);
            }
        }
    }

    let unknown: Vec<String> = object
        .keys()
        .filter(|key| !fields.iter().any(|f| f.name == key.as_str()))
        .cloned()
        .collect();
    for key in unknown {
        errors.push(format!(
            "instance is not allowed to have the additional property \"{}\"",
            key
        ));
        object.remove(&key);
    }

    Checked {
        errors,
        repaired: Value::Object(object),
    }
}

fn placeholders(fields: &[Field]) -> Map<String, Value> {
    fields
        .iter()
        .filter(|f| f.required)
        .map(|f| (f.name.to_string(), f.kind.placeholder()))
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Technical specifications: an open-ended map of scalar attributes.
//!
//! Specs have no fixed schema (needles, heads, embroidery field, ...), but every
//! value must be a scalar. Nested objects, arrays and `null` are rejected when
//! parsing user-supplied text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// A single spec value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

/// Spec attributes keyed by name.
pub type Specs = BTreeMap<String, SpecValue>;

impl SpecValue {
    /// Build a numeric value from a float. Returns `None` for NaN/infinite.
    pub fn number(value: f64) -> Option<Self> {
        Number::from_f64(value).map(SpecValue::Number)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SpecValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SpecValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for SpecValue {
    fn from(value: bool) -> Self {
        SpecValue::Bool(value)
    }
}

impl From<i64> for SpecValue {
    fn from(value: i64) -> Self {
        SpecValue::Number(value.into())
    }
}

impl From<u64> for SpecValue {
    fn from(value: u64) -> Self {
        SpecValue::Number(value.into())
    }
}

impl From<&str> for SpecValue {
    fn from(value: &str) -> Self {
        SpecValue::Text(value.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(value: String) -> Self {
        SpecValue::Text(value)
    }
}

/// Structural failure while reading specs from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecsError {
    #[error("specs must be valid JSON: {0}")]
    Syntax(String),

    #[error("specs must be a JSON object")]
    NotAnObject,

    #[error("spec `{key}` must be a string, number or boolean")]
    NonScalar { key: String },
}

/// Parse specs from their textual (JSON) form.
///
/// Blank text means "no specs".
pub fn parse_specs(text: &str) -> Result<Specs, SpecsError> {
    if text.trim().is_empty() {
        return Ok(Specs::new());
    }

    let value: Value = serde_json::from_str(text).map_err(|e| SpecsError::Syntax(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(SpecsError::NotAnObject);
    };

    map.into_iter()
        .map(|(key, value)| {
            let spec = match value {
                Value::Bool(b) => SpecValue::Bool(b),
                Value::Number(n) => SpecValue::Number(n),
                Value::String(s) => SpecValue::Text(s),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(SpecsError::NonScalar { key });
                }
            };
            Ok((key, spec))
        })
        .collect()
}

/// Render specs as pretty-printed JSON (two-space indent), the editable form.
pub fn specs_to_text(specs: &Specs) -> String {
    serde_json::to_string_pretty(specs).unwrap_or_else(|_| "{}".to_string())
}

/// Specs as held by a form: already structured, or raw text still to be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecsInput {
    Parsed(Specs),
    Text(String),
}

impl SpecsInput {
    /// Structured specs, parsing text if needed.
    pub fn resolve(&self) -> Result<Specs, SpecsError> {
        match self {
            SpecsInput::Parsed(specs) => Ok(specs.clone()),
            SpecsInput::Text(text) => parse_specs(text),
        }
    }
}

impl Default for SpecsInput {
    fn default() -> Self {
        SpecsInput::Parsed(Specs::new())
    }
}

impl From<Specs> for SpecsInput {
    fn from(value: Specs) -> Self {
        SpecsInput::Parsed(value)
    }
}

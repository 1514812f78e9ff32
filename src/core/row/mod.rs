use crate::core::error::RowError;
use crate::utils::value::scalar_to_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One source record: an ordered mapping of field names to values.
///
/// Rules read rows freely but only change them through [`Row::set`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: Map<String, Value>,
}

impl Row {
    /// Accepts only JSON objects; anything else is not a row.
    pub fn from_value(value: Value) -> Result<Self, RowError> {
        match value {
            Value::Object(fields) => Ok(Row { fields }),
            other => Err(RowError::NotAMapping {
                found: value_kind(&other).to_string(),
            }),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Scalar field rendered as text; absent and null read as empty.
    pub fn get_string(&self, field: &str) -> String {
        self.get(field).map(scalar_to_string).unwrap_or_default()
    }

    /// Whether the property exists at all, even when null or empty.
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Replace (or add) a field, keeping its original position.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Field instance records carried under `instances`, in source order.
    /// A keyed mapping is read as its values.
    pub fn instances(&self) -> Vec<&Value> {
        match self.get("instances") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            _ => Vec::new(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read accessors for one element of a row's `instances` sequence.
#[derive(Debug, Clone, Copy)]
pub struct FieldInstanceRecord<'a> {
    raw: &'a Value,
}

impl<'a> FieldInstanceRecord<'a> {
    pub fn new(raw: &'a Value) -> Self {
        FieldInstanceRecord { raw }
    }

    fn attr(&self, name: &str) -> Option<&'a Value> {
        self.raw.get(name)
    }

    pub fn id(&self) -> String {
        self.attr("id").map(scalar_to_string).unwrap_or_default()
    }

    /// `None` when the bundle is missing or empty: malformed source data.
    pub fn bundle(&self) -> Option<String> {
        self.attr("bundle")
            .map(scalar_to_string)
            .filter(|bundle| !bundle.is_empty())
    }

    pub fn field_name(&self) -> Option<String> {
        self.attr("field_name")
            .map(scalar_to_string)
            .filter(|name| !name.is_empty())
    }
}

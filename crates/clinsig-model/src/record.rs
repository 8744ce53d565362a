//! Per-variant annotation records and evaluation outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::{AnnotationError, Result};
use crate::value::{FieldKind, RawFieldValue, Scalar};

/// The fields known for one variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationRecord {
    pub id: Option<String>,
    pub fields: BTreeMap<String, RawFieldValue>,
}

impl AnnotationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<RawFieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&RawFieldValue> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: RawFieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<RawFieldValue> {
        self.fields.remove(name)
    }

    /// Build a record from `{"id": ..., "fields": {...}}`.
    ///
    /// `kind_of` supplies the declared kind for each field name; fields
    /// without a declaration keep the kind JSON gives them.
    pub fn from_json<F>(value: &Value, kind_of: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<FieldKind>,
    {
        let Value::Object(object) = value else {
            return Err(AnnotationError::shape("record must be a JSON object"));
        };
        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            Some(_) => return Err(AnnotationError::shape("record id must be a string")),
        };
        let mut record = AnnotationRecord {
            id,
            fields: BTreeMap::new(),
        };
        match object.get("fields") {
            None | Some(Value::Null) => {}
            Some(Value::Object(fields)) => {
                for (name, raw) in fields {
                    let value = RawFieldValue::from_json(raw, kind_of(name))?;
                    record.fields.insert(name.clone(), value);
                }
            }
            Some(_) => return Err(AnnotationError::shape("record fields must be an object")),
        }
        Ok(record)
    }
}

/// A value produced by a post-annotation op.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Flag(bool),
    Text(String),
    Float(f64),
    Integer(i64),
}

impl OutputValue {
    pub fn render(&self) -> String {
        match self {
            OutputValue::Flag(value) => value.to_string(),
            OutputValue::Text(value) => value.clone(),
            OutputValue::Float(value) => value.to_string(),
            OutputValue::Integer(value) => value.to_string(),
        }
    }

    /// Whether the value sets a Flag column: anything but `false`, `0` or
    /// an empty string.
    pub fn is_truthy(&self) -> bool {
        let rendered = self.render();
        !(rendered.eq_ignore_ascii_case("false") || rendered == "0" || rendered.is_empty())
    }

    /// The value as a record field, so later post-annotations can read it.
    pub fn to_field_value(&self) -> RawFieldValue {
        let scalar = match self {
            OutputValue::Flag(value) => Scalar::Flag(*value),
            OutputValue::Text(value) => Scalar::Text(value.clone()),
            OutputValue::Float(value) => Scalar::Float(*value),
            OutputValue::Integer(value) => Scalar::Integer(*value),
        };
        RawFieldValue::Scalar(scalar)
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A post-annotation that failed for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnError {
    pub column: String,
    pub op: String,
    pub error: AnnotationError,
}

/// Result of evaluating every post-annotation against one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordOutcome {
    pub id: Option<String>,
    pub columns: BTreeMap<String, OutputValue>,
    pub errors: Vec<ColumnError>,
}

impl RecordOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&OutputValue> {
        self.columns.get(name)
    }
}

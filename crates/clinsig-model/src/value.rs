//! Raw per-variant field values.
//!
//! Values carry the kind they were declared with so code tables never have to
//! guess whether `5` and `"5"` mean the same thing. The conversion to a lookup
//! key happens in exactly one place, [`Scalar::to_code`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnnotationError, Result};

/// Delimiter between top-level elements of a multi-value field.
pub const ELEMENT_DELIMITER: char = ',';

/// Delimiter between co-occurring codes inside one element.
pub const COMPOSITE_DELIMITER: char = '|';

/// Declared kind of an annotation field, using the VCF INFO type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    #[default]
    String,
    Flag,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Integer => "Integer",
            FieldKind::Float => "Float",
            FieldKind::String => "String",
            FieldKind::Flag => "Flag",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field value tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl Scalar {
    /// Parse text according to a declared kind.
    pub fn parse(kind: FieldKind, text: &str) -> Result<Self> {
        match kind {
            FieldKind::Integer => text
                .trim()
                .parse::<i64>()
                .map(Scalar::Integer)
                .map_err(|_| AnnotationError::malformed(text, "expected an integer")),
            FieldKind::Float => text
                .trim()
                .parse::<f64>()
                .map(Scalar::Float)
                .map_err(|_| AnnotationError::malformed(text, "expected a number")),
            FieldKind::String => Ok(Scalar::Text(text.to_string())),
            FieldKind::Flag => match text.trim().to_ascii_lowercase().as_str() {
                "" | "true" | "1" => Ok(Scalar::Flag(true)),
                "false" | "0" => Ok(Scalar::Flag(false)),
                _ => Err(AnnotationError::malformed(text, "expected a flag")),
            },
        }
    }

    /// The string key used against code tables.
    ///
    /// Integral floats render without a fractional part (`5.0` becomes `"5"`),
    /// which is what `f64`'s `Display` produces.
    pub fn to_code(&self) -> String {
        match self {
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Text(value) => value.clone(),
            Scalar::Flag(value) => value.to_string(),
        }
    }

    /// Numeric view of a scalar declared as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Scalar::Integer(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(_) | Scalar::Flag(_) => None,
        }
    }

    /// Integer code view used by exact-match classification.
    pub fn as_code(&self) -> Result<i64> {
        match self {
            Scalar::Integer(value) => Ok(*value),
            #[allow(clippy::cast_possible_truncation)]
            Scalar::Float(value) if value.is_finite() && value.fract() == 0.0 => Ok(*value as i64),
            Scalar::Float(value) => Err(AnnotationError::malformed(
                value.to_string(),
                "expected an integral code",
            )),
            Scalar::Text(text) => text
                .parse::<i64>()
                .map_err(|_| AnnotationError::malformed(text.as_str(), "expected an integer code")),
            Scalar::Flag(value) => Err(AnnotationError::malformed(
                value.to_string(),
                "flags are not codes",
            )),
        }
    }

    fn from_json(value: &Value, declared: Option<FieldKind>) -> Result<Self> {
        match value {
            Value::Null => Err(AnnotationError::shape("null is not a field value")),
            Value::Array(_) => Err(AnnotationError::shape(
                "nested sequences are not supported",
            )),
            Value::Object(_) => Err(AnnotationError::shape("objects are not field values")),
            Value::Bool(flag) => match declared {
                None | Some(FieldKind::Flag) => Ok(Scalar::Flag(*flag)),
                Some(kind) => Err(AnnotationError::malformed(
                    flag.to_string(),
                    format!("expected {kind}"),
                )),
            },
            Value::Number(number) => match declared {
                None => Ok(number
                    .as_i64()
                    .map(Scalar::Integer)
                    .unwrap_or_else(|| Scalar::Float(number.as_f64().unwrap_or(f64::NAN)))),
                Some(FieldKind::Integer) => number.as_i64().map(Scalar::Integer).ok_or_else(|| {
                    AnnotationError::malformed(number.to_string(), "expected an integer")
                }),
                Some(FieldKind::Float) => number.as_f64().map(Scalar::Float).ok_or_else(|| {
                    AnnotationError::malformed(number.to_string(), "expected a number")
                }),
                Some(FieldKind::String) => Ok(Scalar::Text(number.to_string())),
                Some(FieldKind::Flag) => Err(AnnotationError::malformed(
                    number.to_string(),
                    "expected Flag",
                )),
            },
            Value::String(text) => match declared {
                None => Ok(Scalar::Text(text.clone())),
                Some(kind) => Scalar::parse(kind, text),
            },
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// A raw annotation field: one scalar or an ordered sequence of scalars.
///
/// Sequence elements may be pipe-delimited composites such as `"4|5"`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFieldValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl RawFieldValue {
    /// Parse the textual form of a field (`"4|5,2"`) with a declared kind.
    ///
    /// Text without a comma yields a scalar; otherwise each comma-separated
    /// element is parsed with the same kind. Empty elements (`"5,"`) are
    /// malformed.
    pub fn parse(kind: FieldKind, text: &str) -> Result<Self> {
        if !text.contains(ELEMENT_DELIMITER) {
            return Scalar::parse(kind, text).map(RawFieldValue::Scalar);
        }
        text.split(ELEMENT_DELIMITER)
            .map(|element| {
                if element.is_empty() {
                    return Err(AnnotationError::malformed(text, "empty element in sequence"));
                }
                Scalar::parse(kind, element)
            })
            .collect::<Result<Vec<_>>>()
            .map(RawFieldValue::Sequence)
    }

    /// Convert a JSON value, honoring the declared kind when one is known.
    ///
    /// Arrays nested inside arrays, objects and nulls are shape errors.
    pub fn from_json(value: &Value, declared: Option<FieldKind>) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| Scalar::from_json(item, declared))
                .collect::<Result<Vec<_>>>()
                .map(RawFieldValue::Sequence),
            other => Scalar::from_json(other, declared).map(RawFieldValue::Scalar),
        }
    }

    /// Elements of the value; a scalar is a one-element slice.
    pub fn elements(&self) -> &[Scalar] {
        match self {
            RawFieldValue::Scalar(scalar) => std::slice::from_ref(scalar),
            RawFieldValue::Sequence(items) => items,
        }
    }

    /// Raw integer codes for exact-match classification.
    pub fn numeric_codes(&self) -> Result<Vec<i64>> {
        self.elements().iter().map(Scalar::as_code).collect()
    }
}

impl fmt::Display for RawFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawFieldValue::Scalar(scalar) => scalar.fmt(f),
            RawFieldValue::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, "{ELEMENT_DELIMITER}")?;
                    }
                    item.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Scalar> for RawFieldValue {
    fn from(value: Scalar) -> Self {
        RawFieldValue::Scalar(value)
    }
}

impl From<Vec<Scalar>> for RawFieldValue {
    fn from(value: Vec<Scalar>) -> Self {
        RawFieldValue::Sequence(value)
    }
}

impl From<&str> for RawFieldValue {
    fn from(value: &str) -> Self {
        RawFieldValue::Scalar(value.into())
    }
}

impl From<i64> for RawFieldValue {
    fn from(value: i64) -> Self {
        RawFieldValue::Scalar(value.into())
    }
}

impl From<f64> for RawFieldValue {
    fn from(value: f64) -> Self {
        RawFieldValue::Scalar(value.into())
    }
}

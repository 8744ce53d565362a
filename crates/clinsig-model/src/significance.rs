//! Decoded clinical significance as consumed by the threshold gate.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::Result;
use crate::value::{ELEMENT_DELIMITER, FieldKind, RawFieldValue};

/// Decoded significance, either one label string or one label per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Significance {
    Scalar(String),
    Composite(Vec<String>),
}

impl Significance {
    /// Comma-join a composite into its single-string form.
    ///
    /// Elements are joined as they are; nothing is decoded again.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Significance::Scalar(label) => Cow::Borrowed(label.as_str()),
            Significance::Composite(labels) => {
                Cow::Owned(labels.join(&ELEMENT_DELIMITER.to_string()))
            }
        }
    }

    /// Read a significance from JSON: a string or a flat array of strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        RawFieldValue::from_json(value, Some(FieldKind::String)).map(Self::from)
    }
}

impl From<&RawFieldValue> for Significance {
    fn from(value: &RawFieldValue) -> Self {
        match value {
            RawFieldValue::Scalar(scalar) => Significance::Scalar(scalar.to_code()),
            RawFieldValue::Sequence(items) => {
                Significance::Composite(items.iter().map(|item| item.to_code()).collect())
            }
        }
    }
}

impl From<RawFieldValue> for Significance {
    fn from(value: RawFieldValue) -> Self {
        Significance::from(&value)
    }
}

impl From<&str> for Significance {
    fn from(value: &str) -> Self {
        Significance::Scalar(value.to_string())
    }
}

impl From<String> for Significance {
    fn from(value: String) -> Self {
        Significance::Scalar(value)
    }
}

impl From<Vec<String>> for Significance {
    fn from(value: Vec<String>) -> Self {
        Significance::Composite(value)
    }
}

impl From<&[&str]> for Significance {
    fn from(value: &[&str]) -> Self {
        Significance::Composite(value.iter().map(|label| (*label).to_string()).collect())
    }
}

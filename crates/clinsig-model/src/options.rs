//! Lookup options.

use serde::{Deserialize, Serialize};

/// What a code-table lookup does with a code the table does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownCodePolicy {
    /// Fail with [`crate::AnnotationError::UnknownCode`].
    #[default]
    Error,
    /// Resolve unknown codes to the given label.
    Substitute(String),
}

impl UnknownCodePolicy {
    /// `Substitute` when a default label is configured, `Error` otherwise.
    pub fn from_default(default: Option<&str>) -> Self {
        match default {
            Some(label) => UnknownCodePolicy::Substitute(label.to_string()),
            None => UnknownCodePolicy::Error,
        }
    }
}

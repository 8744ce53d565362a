use thiserror::Error;

/// Errors raised while evaluating annotation expressions for a single record.
///
/// Every variant is deterministic: re-evaluating the same input reproduces
/// the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    /// A code is absent from the lookup table it was resolved against.
    #[error("unknown code '{code}' in {table} table")]
    UnknownCode { table: &'static str, code: String },

    /// A field value could not be split or converted into codes.
    #[error("malformed field value '{value}': {message}")]
    MalformedField { value: String, message: String },

    /// A value has the wrong number of elements or the wrong nesting.
    #[error("unexpected value shape: {message}")]
    Shape { message: String },

    /// A post-annotation names an operation that is not registered.
    #[error("unknown post-annotation op: {op}")]
    UnknownOp { op: String },

    /// A post-annotation op needs a cutoff that was not configured.
    #[error("post-annotation '{name}' uses op '{op}' which requires a cutoff")]
    MissingCutoff { name: String, op: String },

    /// A post-annotation lists the wrong number of fields for its op.
    #[error("post-annotation '{name}': op '{op}' expects {expected} field(s), got {actual}")]
    FieldCount {
        name: String,
        op: String,
        expected: String,
        actual: usize,
    },
}

impl AnnotationError {
    /// Build a [`AnnotationError::MalformedField`] error.
    pub fn malformed(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedField {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Build a [`AnnotationError::Shape`] error.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotationError>;

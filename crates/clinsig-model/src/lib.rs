//! Data model for clinical-significance annotation expressions.

pub mod error;
pub mod options;
pub mod postanno;
pub mod record;
pub mod significance;
pub mod value;

pub use error::{AnnotationError, Result};
pub use options::UnknownCodePolicy;
pub use postanno::{AnnotationConfig, FieldDeclaration, InfoHeader, OutputType, PostAnnotation};
pub use record::{AnnotationRecord, ColumnError, OutputValue, RecordOutcome};
pub use significance::Significance;
pub use value::{COMPOSITE_DELIMITER, ELEMENT_DELIMITER, FieldKind, RawFieldValue, Scalar};

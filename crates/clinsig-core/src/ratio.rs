//! Allele-count ratio helpers.

use std::fmt;

use clinsig_model::{AnnotationError, Result};

/// Text emitted in place of a ratio when the input has the wrong arity.
pub const BAD_RATIO: &str = "BAD";

/// Outcome of [`ratio`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlleleRatio {
    Value(f64),
    Bad,
}

impl AlleleRatio {
    pub fn value(self) -> Option<f64> {
        match self {
            AlleleRatio::Value(value) => Some(value),
            AlleleRatio::Bad => None,
        }
    }

    /// Turn the `BAD` sentinel into a shape error.
    pub fn into_result(self) -> Result<f64> {
        self.value()
            .ok_or_else(|| AnnotationError::shape("ratio needs exactly two values"))
    }
}

impl fmt::Display for AlleleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlleleRatio::Value(value) => write!(f, "{value}"),
            AlleleRatio::Bad => f.write_str(BAD_RATIO),
        }
    }
}

/// `alt / (ref + alt)` for `[ref, alt]`; `0` when both are zero.
pub fn ratio(values: &[f64]) -> AlleleRatio {
    let &[reference, alternate] = values else {
        return AlleleRatio::Bad;
    };
    let denominator = reference + alternate;
    if denominator == 0.0 {
        return AlleleRatio::Value(0.0);
    }
    AlleleRatio::Value(alternate / denominator)
}

/// `a / b` with nine decimals, or `"0.0"` when `a` is zero.
///
/// Only `a` is guarded: a nonzero `a` over a zero `b` renders as `inf`.
pub fn format_ratio(a: f64, b: f64) -> String {
    if a == 0.0 {
        return "0.0".to_string();
    }
    format!("{:.9}", a / b)
}

//! Small reducers shared by post-annotation ops.

use std::collections::HashSet;

use clinsig_model::ELEMENT_DELIMITER;

#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Comma-join every value in order.
pub fn concat<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&ELEMENT_DELIMITER.to_string())
}

/// Comma-join values, keeping only the first occurrence of each.
pub fn uniq<S: AsRef<str>>(values: &[S]) -> String {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(AsRef::as_ref)
        .filter(|value| seen.insert(*value))
        .collect::<Vec<_>>()
        .join(&ELEMENT_DELIMITER.to_string())
}

/// `chrom:start-end`.
pub fn loc(chrom: &str, start: &str, end: &str) -> String {
    format!("{chrom}:{start}-{end}")
}

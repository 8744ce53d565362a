//! CLI library components for the clinical-significance annotator.

#![allow(missing_docs)]

pub mod annotate;
pub mod logging;

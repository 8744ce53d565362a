//! Post-annotation op trait and registry.
//!
//! Every op a post-annotation can name is a [`PostOp`] registered in an
//! [`OpRegistry`]. The default registry holds the built-in ClinVar, ratio and
//! reducer ops and is cached for the life of the process.
//!
//! # Example
//!
//! ```
//! use clinsig_core::ops::default_registry;
//!
//! let op = default_registry().get("clinvar_sig").unwrap();
//! assert_eq!(op.name(), "clinvar_sig");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use clinsig_model::{
    AnnotationError, OutputValue, PostAnnotation, RawFieldValue, Result, Scalar, Significance,
};

use crate::classify::{
    flag_drug_response, flag_histocompatibility, flag_likely_pathogenic, flag_pathogenic,
};
use crate::code_table::{clinical_significance, variant_origin};
use crate::decode::decode_with;
use crate::ratio::{AlleleRatio, BAD_RATIO, format_ratio, ratio};
use crate::reducers::{concat, loc, max, mean, min, sum, uniq};
use crate::threshold::is_actionable;

/// How many fields an op takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many; the op is skipped unless all of them are present.
    Exactly(usize),
    /// At least this many; the op runs on whichever are present.
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(expected) => count == expected,
            Arity::AtLeast(minimum) => count >= minimum,
        }
    }

    pub fn requires_all(self) -> bool {
        matches!(self, Arity::Exactly(_))
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(count) => write!(f, "{count}"),
            Arity::AtLeast(count) => write!(f, "at least {count}"),
        }
    }
}

/// What applying an op does to the record.
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutput {
    /// Write a value to the post-annotation's column.
    Value(OutputValue),
    /// Remove the post-annotation's fields from the record.
    Delete,
}

/// A named operation a post-annotation can reference.
pub trait PostOp: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn arity(&self) -> Arity;

    /// Whether the post-annotation must configure a `cutoff`.
    fn requires_cutoff(&self) -> bool {
        false
    }

    /// Apply the op to the values of the fields that are present, in
    /// configured order.
    fn apply(&self, values: &[&RawFieldValue], annotation: &PostAnnotation) -> Result<OpOutput>;
}

type OpFn = fn(&[&RawFieldValue], &PostAnnotation) -> Result<OpOutput>;

/// Adapts a plain function to [`PostOp`].
pub struct FunctionOp {
    name: &'static str,
    description: &'static str,
    arity: Arity,
    requires_cutoff: bool,
    func: OpFn,
}

impl FunctionOp {
    pub fn new(name: &'static str, description: &'static str, arity: Arity, func: OpFn) -> Self {
        Self {
            name,
            description,
            arity,
            requires_cutoff: false,
            func,
        }
    }

    #[must_use]
    pub fn with_cutoff(mut self) -> Self {
        self.requires_cutoff = true;
        self
    }
}

impl PostOp for FunctionOp {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn arity(&self) -> Arity {
        self.arity
    }

    fn requires_cutoff(&self) -> bool {
        self.requires_cutoff
    }

    fn apply(&self, values: &[&RawFieldValue], annotation: &PostAnnotation) -> Result<OpOutput> {
        (self.func)(values, annotation)
    }
}

/// Registry of ops indexed by name.
///
/// The registry is immutable once built and can be shared across threads.
pub struct OpRegistry {
    ops: BTreeMap<&'static str, Box<dyn PostOp>>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self {
            ops: BTreeMap::new(),
        }
    }

    /// Registers an op under its name, replacing any previous one.
    pub fn register(&mut self, op: Box<dyn PostOp>) {
        self.ops.insert(op.name(), op);
    }

    pub fn get(&self, name: &str) -> Option<&dyn PostOp> {
        self.ops.get(name).map(|op| op.as_ref())
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Registered ops in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn PostOp> + '_ {
        self.ops.values().map(|op| op.as_ref())
    }
}

impl Default for OpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_REGISTRY: OnceLock<OpRegistry> = OnceLock::new();

/// The built-in ops, built on first access.
pub fn default_registry() -> &'static OpRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> OpRegistry {
    let mut registry = OpRegistry::new();

    registry.register(Box::new(FunctionOp::new(
        "clinvar_sig",
        "Decode clinical significance codes to labels",
        Arity::Exactly(1),
        clinvar_sig,
    )));
    registry.register(Box::new(FunctionOp::new(
        "clinvar_origin",
        "Decode variant origin codes to labels",
        Arity::Exactly(1),
        clinvar_origin,
    )));
    registry.register(Box::new(FunctionOp::new(
        "clinvar_pathogenic_flag",
        "Set when any significance code is 5 (pathogenic)",
        Arity::Exactly(1),
        |values, _| code_flag(values, flag_pathogenic),
    )));
    registry.register(Box::new(FunctionOp::new(
        "clinvar_likely_pathogenic_flag",
        "Set when any significance code is 4 (likely pathogenic)",
        Arity::Exactly(1),
        |values, _| code_flag(values, flag_likely_pathogenic),
    )));
    registry.register(Box::new(FunctionOp::new(
        "clinvar_histocompatibility_flag",
        "Set when any significance code is 7 (histocompatibility)",
        Arity::Exactly(1),
        |values, _| code_flag(values, flag_histocompatibility),
    )));
    registry.register(Box::new(FunctionOp::new(
        "clinvar_drug_response_flag",
        "Set when any significance code is 6 (drug response)",
        Arity::Exactly(1),
        |values, _| code_flag(values, flag_drug_response),
    )));
    registry.register(Box::new(
        FunctionOp::new(
            "check_clinvar_aaf",
            "Set when significance is pathogenic and max_aaf_all exceeds the cutoff",
            Arity::Exactly(2),
            check_clinvar_aaf,
        )
        .with_cutoff(),
    ));
    registry.register(Box::new(FunctionOp::new(
        "div2",
        "alt / (ref + alt) over two counts",
        Arity::Exactly(2),
        div2,
    )));
    registry.register(Box::new(FunctionOp::new(
        "div",
        "a / b with nine decimals",
        Arity::Exactly(2),
        div,
    )));
    registry.register(Box::new(FunctionOp::new(
        "mean",
        "Mean of all numeric values",
        Arity::AtLeast(1),
        mean_op,
    )));
    registry.register(Box::new(FunctionOp::new(
        "sum",
        "Sum of all numeric values",
        Arity::AtLeast(1),
        |values, _| numeric_reduction(values, |numbers| Some(sum(numbers)), "sum"),
    )));
    registry.register(Box::new(FunctionOp::new(
        "max",
        "Largest numeric value",
        Arity::AtLeast(1),
        |values, _| numeric_reduction(values, max, "max"),
    )));
    registry.register(Box::new(FunctionOp::new(
        "min",
        "Smallest numeric value",
        Arity::AtLeast(1),
        |values, _| numeric_reduction(values, min, "min"),
    )));
    registry.register(Box::new(FunctionOp::new(
        "count",
        "Number of input fields present",
        Arity::AtLeast(1),
        count_op,
    )));
    registry.register(Box::new(FunctionOp::new(
        "concat",
        "Comma-join all values",
        Arity::AtLeast(1),
        |values, _| Ok(OpOutput::Value(OutputValue::Text(concat(&rendered(values))))),
    )));
    registry.register(Box::new(FunctionOp::new(
        "uniq",
        "Comma-join distinct values in first-seen order",
        Arity::AtLeast(1),
        |values, _| Ok(OpOutput::Value(OutputValue::Text(uniq(&rendered(values))))),
    )));
    registry.register(Box::new(FunctionOp::new(
        "first",
        "First input field present",
        Arity::AtLeast(1),
        |values, _| Ok(OpOutput::Value(output_of(values[0]))),
    )));
    registry.register(Box::new(FunctionOp::new(
        "self",
        "The single value, or all values comma-joined",
        Arity::AtLeast(1),
        self_op,
    )));
    registry.register(Box::new(FunctionOp::new(
        "flag",
        "Set when any input field is present",
        Arity::AtLeast(1),
        |_, _| Ok(OpOutput::Value(OutputValue::Flag(true))),
    )));
    registry.register(Box::new(FunctionOp::new(
        "loc",
        "chrom:start-end",
        Arity::Exactly(3),
        loc_op,
    )));
    registry.register(Box::new(FunctionOp::new(
        "delete",
        "Remove the listed fields from the record",
        Arity::AtLeast(1),
        |_, _| Ok(OpOutput::Delete),
    )));

    registry
}

fn clinvar_sig(values: &[&RawFieldValue], annotation: &PostAnnotation) -> Result<OpOutput> {
    let decoded = decode_with(
        clinical_significance(),
        values[0],
        &annotation.unknown_code_policy(),
    )?;
    Ok(OpOutput::Value(OutputValue::Text(decoded)))
}

fn clinvar_origin(values: &[&RawFieldValue], annotation: &PostAnnotation) -> Result<OpOutput> {
    let decoded = decode_with(
        variant_origin(),
        values[0],
        &annotation.unknown_code_policy(),
    )?;
    Ok(OpOutput::Value(OutputValue::Text(decoded)))
}

fn code_flag(values: &[&RawFieldValue], flag: fn(&[i64]) -> bool) -> Result<OpOutput> {
    let codes = values[0].numeric_codes()?;
    Ok(OpOutput::Value(OutputValue::Flag(flag(&codes))))
}

fn check_clinvar_aaf(values: &[&RawFieldValue], annotation: &PostAnnotation) -> Result<OpOutput> {
    let cutoff = annotation
        .cutoff
        .ok_or_else(|| AnnotationError::MissingCutoff {
            name: annotation.name.clone(),
            op: annotation.op.clone(),
        })?;
    let significance = Significance::from(values[0]);
    let max_aaf_all = single_number(values[1])?;
    Ok(OpOutput::Value(OutputValue::Flag(is_actionable(
        &significance,
        max_aaf_all,
        cutoff,
    ))))
}

fn div2(values: &[&RawFieldValue], _: &PostAnnotation) -> Result<OpOutput> {
    let numbers = numeric_values(values)?;
    let output = match ratio(&numbers) {
        AlleleRatio::Value(value) => OutputValue::Float(value),
        AlleleRatio::Bad => OutputValue::Text(BAD_RATIO.to_string()),
    };
    Ok(OpOutput::Value(output))
}

fn div(values: &[&RawFieldValue], _: &PostAnnotation) -> Result<OpOutput> {
    let a = single_number(values[0])?;
    let b = single_number(values[1])?;
    Ok(OpOutput::Value(OutputValue::Text(format_ratio(a, b))))
}

fn mean_op(values: &[&RawFieldValue], _: &PostAnnotation) -> Result<OpOutput> {
    let numbers = numeric_values(values)?;
    let value = mean(&numbers).ok_or_else(|| AnnotationError::shape("mean of zero values"))?;
    Ok(OpOutput::Value(OutputValue::Float(value)))
}

fn numeric_reduction(
    values: &[&RawFieldValue],
    reduce: fn(&[f64]) -> Option<f64>,
    name: &str,
) -> Result<OpOutput> {
    let numbers = numeric_values(values)?;
    let value = reduce(&numbers)
        .ok_or_else(|| AnnotationError::shape(format!("{name} of zero values")))?;
    Ok(OpOutput::Value(OutputValue::Float(value)))
}

fn count_op(values: &[&RawFieldValue], _: &PostAnnotation) -> Result<OpOutput> {
    let count = i64::try_from(values.len())
        .map_err(|_| AnnotationError::shape("too many values to count"))?;
    Ok(OpOutput::Value(OutputValue::Integer(count)))
}

fn self_op(values: &[&RawFieldValue], _: &PostAnnotation) -> Result<OpOutput> {
    let output = match values {
        [single] => output_of(single),
        many => OutputValue::Text(concat(&rendered(many))),
    };
    Ok(OpOutput::Value(output))
}

/// A field value carried through unchanged; sequences become their text form.
fn output_of(value: &RawFieldValue) -> OutputValue {
    match value {
        RawFieldValue::Scalar(Scalar::Integer(value)) => OutputValue::Integer(*value),
        RawFieldValue::Scalar(Scalar::Float(value)) => OutputValue::Float(*value),
        RawFieldValue::Scalar(Scalar::Text(value)) => OutputValue::Text(value.clone()),
        RawFieldValue::Scalar(Scalar::Flag(value)) => OutputValue::Flag(*value),
        RawFieldValue::Sequence(_) => OutputValue::Text(value.to_string()),
    }
}

fn rendered(values: &[&RawFieldValue]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn loc_op(values: &[&RawFieldValue], _: &PostAnnotation) -> Result<OpOutput> {
    let chrom = single_scalar(values[0])?.to_code();
    let start = single_scalar(values[1])?.to_code();
    let end = single_scalar(values[2])?.to_code();
    Ok(OpOutput::Value(OutputValue::Text(loc(&chrom, &start, &end))))
}

fn single_scalar(value: &RawFieldValue) -> Result<&Scalar> {
    match value {
        RawFieldValue::Scalar(scalar) => Ok(scalar),
        RawFieldValue::Sequence(_) => Err(AnnotationError::shape(format!(
            "expected a single value, got '{value}'"
        ))),
    }
}

fn single_number(value: &RawFieldValue) -> Result<f64> {
    let scalar = single_scalar(value)?;
    scalar
        .as_f64()
        .ok_or_else(|| AnnotationError::malformed(scalar.to_code(), "expected a number"))
}

/// Every element of every value as a number, flattened in order.
fn numeric_values(values: &[&RawFieldValue]) -> Result<Vec<f64>> {
    let mut numbers = Vec::new();
    for value in values {
        for scalar in value.elements() {
            let number = scalar
                .as_f64()
                .ok_or_else(|| AnnotationError::malformed(scalar.to_code(), "expected a number"))?;
            numbers.push(number);
        }
    }
    Ok(numbers)
}

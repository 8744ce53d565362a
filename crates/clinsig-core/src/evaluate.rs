//! Per-record post-annotation evaluation.
//!
//! Post-annotations run in configured order. Each output is written back
//! into the record, so a later post-annotation can consume an earlier one
//! (for example, a threshold check reading the decoded significance column).
//! A failing post-annotation is recorded on the outcome and the rest still
//! run; records never affect one another.

use clinsig_model::postanno::ID_COLUMN;
use clinsig_model::{
    AnnotationError, AnnotationRecord, ColumnError, OutputType, OutputValue, PostAnnotation,
    RawFieldValue, RecordOutcome, Scalar,
};
use tracing::{debug, info_span, trace, warn};

use crate::ops::{OpOutput, OpRegistry, default_registry};

/// Runs a fixed list of post-annotations over records.
pub struct Evaluator<'a> {
    annotations: &'a [PostAnnotation],
    registry: &'a OpRegistry,
}

impl<'a> Evaluator<'a> {
    /// Evaluator backed by the built-in op registry.
    pub fn new(annotations: &'a [PostAnnotation]) -> Self {
        Self::with_registry(annotations, default_registry())
    }

    pub fn with_registry(annotations: &'a [PostAnnotation], registry: &'a OpRegistry) -> Self {
        Self {
            annotations,
            registry,
        }
    }

    /// Evaluate every post-annotation against `record`, updating it in place.
    pub fn evaluate(&self, record: &mut AnnotationRecord) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();
        for annotation in self.annotations {
            match self.apply(annotation, record) {
                Ok(Some(value)) => {
                    if annotation.sets_id() {
                        record.id = Some(value.render());
                    } else {
                        record.insert(annotation.name.clone(), value.to_field_value());
                        outcome.columns.insert(annotation.name.clone(), value);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        column = %annotation.name,
                        op = %annotation.op,
                        record = record.id.as_deref().unwrap_or("."),
                        %error,
                        "post-annotation failed"
                    );
                    outcome.errors.push(ColumnError {
                        column: annotation.name.clone(),
                        op: annotation.op.clone(),
                        error,
                    });
                }
            }
        }
        outcome.id = record.id.clone();
        outcome
    }

    /// Evaluate a batch; each record is isolated from the others.
    pub fn evaluate_batch<I>(&self, records: I) -> Vec<RecordOutcome>
    where
        I: IntoIterator<Item = AnnotationRecord>,
    {
        let span = info_span!("evaluate_batch", post_annotations = self.annotations.len());
        let _guard = span.enter();
        let outcomes: Vec<RecordOutcome> = records
            .into_iter()
            .map(|mut record| self.evaluate(&mut record))
            .collect();
        debug!(records = outcomes.len(), "batch evaluated");
        outcomes
    }

    /// Run one post-annotation. `Ok(None)` means nothing was written.
    fn apply(
        &self,
        annotation: &PostAnnotation,
        record: &mut AnnotationRecord,
    ) -> Result<Option<OutputValue>, AnnotationError> {
        let op = self
            .registry
            .get(&annotation.op)
            .ok_or_else(|| AnnotationError::UnknownOp {
                op: annotation.op.clone(),
            })?;

        // `ID` reads the record identifier, like any other field.
        let id = record
            .id
            .as_ref()
            .map(|id| RawFieldValue::Scalar(Scalar::Text(id.clone())));
        let values: Vec<&RawFieldValue> = annotation
            .fields
            .iter()
            .filter_map(|field| match field.as_str() {
                ID_COLUMN => id.as_ref().or_else(|| record.get(field)),
                _ => record.get(field),
            })
            .collect();
        if values.is_empty() {
            trace!(column = %annotation.name, "no input fields present");
            return Ok(None);
        }
        if op.arity().requires_all() && values.len() < annotation.fields.len() {
            trace!(column = %annotation.name, "skipping, not all input fields present");
            return Ok(None);
        }
        if !op.arity().accepts(values.len()) {
            return Err(AnnotationError::FieldCount {
                name: annotation.name.clone(),
                op: annotation.op.clone(),
                expected: op.arity().to_string(),
                actual: values.len(),
            });
        }

        match op.apply(&values, annotation)? {
            OpOutput::Delete => {
                for field in &annotation.fields {
                    record.remove(field);
                }
                Ok(None)
            }
            OpOutput::Value(value) if annotation.output_type == OutputType::Flag => {
                Ok(value.is_truthy().then_some(OutputValue::Flag(true)))
            }
            OpOutput::Value(value) => Ok(Some(value)),
        }
    }
}

//! Batch annotation: JSON-lines records in, tab-separated columns out.
//!
//! Each input line is one record, `{"id": "...", "fields": {...}}`. A line
//! that cannot be read is reported with its line number and skipped; every
//! other record is evaluated and written, including records where some
//! post-annotations failed.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clinsig_core::evaluate::Evaluator;
use clinsig_core::load_config;
use clinsig_model::{AnnotationConfig, AnnotationRecord, OutputType, RecordOutcome};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::logging::redact_value;

/// Header of the first output column.
pub const ID_HEADER: &str = "id";
/// Written in the id column when a record has no id.
pub const MISSING_ID: &str = ".";

/// An input line that could not be turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct InputError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Per-column counts for the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    pub op: String,
    pub output_type: OutputType,
    pub written: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotateReport {
    pub outcomes: Vec<RecordOutcome>,
    pub input_errors: Vec<InputError>,
    pub columns: Vec<ColumnStats>,
}

impl AnnotateReport {
    pub fn records(&self) -> usize {
        self.outcomes.len()
    }

    pub fn column_errors(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.errors.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.input_errors.is_empty() || self.outcomes.iter().any(RecordOutcome::has_errors)
    }
}

/// Parse every non-blank line of `input` into a record.
pub fn read_records<R: BufRead>(
    input: R,
    config: &AnnotationConfig,
) -> Result<(Vec<AnnotationRecord>, Vec<InputError>)> {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (index, line) in input.split(b'\n').enumerate() {
        let line_number = index + 1;
        let bytes = line.with_context(|| format!("read input line {line_number}"))?;
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(error) => {
                warn!(line = line_number, %error, "skipping undecodable line");
                errors.push(InputError {
                    line: line_number,
                    message: format!("invalid UTF-8: {error}"),
                });
                continue;
            }
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match parse_record(text, config) {
            Ok(record) => records.push(record),
            Err(message) => {
                warn!(
                    line = line_number,
                    value = redact_value(text),
                    error = %message,
                    "skipping unreadable record"
                );
                errors.push(InputError {
                    line: line_number,
                    message,
                });
            }
        }
    }
    Ok((records, errors))
}

fn parse_record(text: &str, config: &AnnotationConfig) -> Result<AnnotationRecord, String> {
    let value: Value = serde_json::from_str(text).map_err(|error| error.to_string())?;
    AnnotationRecord::from_json(&value, |name| config.declared_kind(name))
        .map_err(|error| error.to_string())
}

/// Write one header row plus one row per outcome.
///
/// Columns follow the configured order. Cells for columns a record did
/// not produce are left empty.
pub fn write_tsv<W: Write>(
    output: W,
    config: &AnnotationConfig,
    outcomes: &[RecordOutcome],
) -> Result<()> {
    let columns = config.output_columns();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(output);

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(ID_HEADER);
    header.extend(columns.iter().copied());
    writer.write_record(&header).context("write header row")?;

    for outcome in outcomes {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(outcome.id.clone().unwrap_or_else(|| MISSING_ID.to_string()));
        for column in &columns {
            row.push(
                outcome
                    .column(column)
                    .map(|value| value.render())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row).context("write record row")?;
    }
    writer.flush().context("flush output")?;
    Ok(())
}

/// Read, evaluate and write one batch.
pub fn annotate<R: BufRead, W: Write>(
    config: &AnnotationConfig,
    input: R,
    output: W,
) -> Result<AnnotateReport> {
    let (records, input_errors) = read_records(input, config)?;
    info!(
        records = records.len(),
        skipped = input_errors.len(),
        "records read"
    );

    let evaluator = Evaluator::new(&config.post_annotations);
    let outcomes = evaluator.evaluate_batch(records);
    write_tsv(output, config, &outcomes)?;

    let columns = column_stats(config, &outcomes);
    Ok(AnnotateReport {
        outcomes,
        input_errors,
        columns,
    })
}

/// [`annotate`] over files. `-` reads stdin; no output path writes stdout.
pub fn annotate_files(
    config_path: &Path,
    input_path: &Path,
    output_path: Option<&Path>,
) -> Result<AnnotateReport> {
    let span = info_span!("annotate", config = %config_path.display());
    let _guard = span.enter();

    let config = load_config(config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;
    debug!(
        post_annotations = config.post_annotations.len(),
        declared_fields = config.fields.len(),
        "config loaded"
    );

    let input: Box<dyn BufRead> = if input_path == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(input_path)
            .with_context(|| format!("open input {}", input_path.display()))?;
        Box::new(BufReader::new(file))
    };

    match output_path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create output {}", path.display()))?;
            annotate(&config, input, BufWriter::new(file))
        }
        None => annotate(&config, input, io::stdout().lock()),
    }
}

fn column_stats(config: &AnnotationConfig, outcomes: &[RecordOutcome]) -> Vec<ColumnStats> {
    let mut errors: BTreeMap<&str, usize> = BTreeMap::new();
    for outcome in outcomes {
        for error in &outcome.errors {
            *errors.entry(error.column.as_str()).or_default() += 1;
        }
    }
    config
        .post_annotations
        .iter()
        .filter(|post| !post.name.is_empty() && !post.sets_id())
        .map(|post| ColumnStats {
            name: post.name.clone(),
            op: post.op.clone(),
            output_type: post.output_type,
            written: outcomes
                .iter()
                .filter(|outcome| outcome.column(&post.name).is_some())
                .count(),
            errors: errors.get(post.name.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

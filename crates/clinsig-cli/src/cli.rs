//! CLI argument definitions for the clinical-significance annotator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use clinsig_model::FieldKind;
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clinsig",
    version,
    about = "Decode ClinVar significance codes and compute post-annotation columns",
    long_about = "Decode ClinVar clinical-significance and origin codes, derive \
                  pathogenicity flags and allele ratios, and evaluate configured \
                  post-annotation columns over JSON-lines variant records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include record field values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the code tables.
    Tables,

    /// List the ops a post-annotation can use.
    Ops,

    /// Decode a field value to labels.
    Decode(DecodeArgs),

    /// Compute the pathogenicity flags for a list of codes.
    Flags(FlagsArgs),

    /// Check a significance against an allele-frequency cutoff.
    Actionable(ActionableArgs),

    /// Compute an allele ratio.
    Ratio(RatioArgs),

    /// Print INFO header lines for a post-annotation config.
    Header(HeaderArgs),

    /// Evaluate a post-annotation config over JSON-lines records.
    Annotate(AnnotateArgs),
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// Raw value; commas separate elements and pipes separate codes.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Code table to decode against.
    #[arg(long = "table", value_enum, default_value = "significance")]
    pub table: TableArg,

    /// Declared field type used to parse the value.
    #[arg(long = "kind", value_enum, default_value = "string")]
    pub kind: KindArg,

    /// Label substituted for unknown codes instead of failing.
    #[arg(long = "unknown", value_name = "LABEL")]
    pub unknown: Option<String>,
}

#[derive(Parser)]
pub struct FlagsArgs {
    /// Numeric significance codes.
    #[arg(value_name = "CODE", required = true, value_delimiter = ',')]
    pub codes: Vec<i64>,

    /// Print the flags as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ActionableArgs {
    /// Decoded significance; several values form a composite.
    #[arg(value_name = "SIGNIFICANCE", required = true)]
    pub significance: Vec<String>,

    /// Maximum alternate allele frequency across populations.
    #[arg(long = "max-aaf")]
    pub max_aaf: f64,

    /// Frequency the variant must exceed.
    #[arg(long = "cutoff")]
    pub cutoff: f64,
}

#[derive(Parser)]
pub struct RatioArgs {
    /// Reference and alternate counts.
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Print `a / b` with nine decimals instead of `alt / (ref + alt)`.
    #[arg(long = "format")]
    pub format: bool,
}

#[derive(Parser)]
pub struct HeaderArgs {
    /// Post-annotation config (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,
}

#[derive(Parser)]
pub struct AnnotateArgs {
    /// Post-annotation config (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,

    /// JSON-lines records, or `-` for stdin.
    #[arg(long = "input", value_name = "PATH", default_value = "-")]
    pub input: PathBuf,

    /// Output TSV path (default: stdout).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableArg {
    Significance,
    Origin,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Integer,
    Float,
    String,
}

impl From<KindArg> for FieldKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Integer => FieldKind::Integer,
            KindArg::Float => FieldKind::Float,
            KindArg::String => FieldKind::String,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::debug;

use clinsig_cli::annotate::{AnnotateReport, annotate_files};
use clinsig_core::classify::PathogenicityFlags;
use clinsig_core::code_table::{CodeTable, all_tables, clinical_significance, variant_origin};
use clinsig_core::decode::decode_with;
use clinsig_core::load_config;
use clinsig_core::ops::default_registry;
use clinsig_core::ratio::{format_ratio, ratio};
use clinsig_core::threshold::is_actionable;
use clinsig_model::{RawFieldValue, Significance, UnknownCodePolicy};

use crate::cli::{
    ActionableArgs, AnnotateArgs, DecodeArgs, FlagsArgs, HeaderArgs, RatioArgs, TableArg,
};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

pub fn run_tables() -> Result<()> {
    for table in all_tables() {
        let mut output = Table::new();
        output.set_header(vec![header_cell("Code"), header_cell("Label")]);
        apply_table_style(&mut output);
        align_column(&mut output, 0, CellAlignment::Right);
        for (code, label) in table.entries() {
            output.add_row(vec![code, label]);
        }
        println!("{} ({} codes)", table.name(), table.len());
        println!("{output}");
    }
    Ok(())
}

pub fn run_ops() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Op"),
        header_cell("Fields"),
        header_cell("Cutoff"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for op in default_registry().iter() {
        let cutoff = if op.requires_cutoff() {
            Cell::new("required")
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(op.name()),
            Cell::new(op.arity()),
            cutoff,
            Cell::new(op.description()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let table = code_table(args.table);
    let value = RawFieldValue::parse(args.kind.into(), &args.value)
        .with_context(|| format!("parse value for the {} table", table.name()))?;
    let policy = UnknownCodePolicy::from_default(args.unknown.as_deref());
    debug!(table = table.name(), elements = value.elements().len(), "decoding");
    let decoded = decode_with(table, &value, &policy)?;
    println!("{decoded}");
    Ok(())
}

pub fn run_flags(args: &FlagsArgs) -> Result<()> {
    let flags = PathogenicityFlags::from_codes(&args.codes);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&flags).context("serialize flags")?
        );
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Flag"), header_cell("Set")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (name, set) in [
        ("pathogenic", flags.pathogenic),
        ("likely_pathogenic", flags.likely_pathogenic),
        ("histocompatibility", flags.histocompatibility),
        ("drug_response", flags.drug_response),
    ] {
        table.add_row(vec![name.to_string(), set.to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_actionable(args: &ActionableArgs) -> Result<()> {
    let significance = match args.significance.as_slice() {
        [single] => Significance::Scalar(single.clone()),
        many => Significance::Composite(many.to_vec()),
    };
    let actionable = is_actionable(&significance, args.max_aaf, args.cutoff);
    println!("{actionable}");
    Ok(())
}

pub fn run_ratio(args: &RatioArgs) -> Result<()> {
    if args.format {
        let &[a, b] = args.values.as_slice() else {
            bail!(
                "--format takes exactly two values, got {}",
                args.values.len()
            );
        };
        println!("{}", format_ratio(a, b));
    } else {
        println!("{}", ratio(&args.values));
    }
    Ok(())
}

pub fn run_header(args: &HeaderArgs) -> Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    for header in config.info_headers() {
        println!("{header}");
    }
    Ok(())
}

pub fn run_annotate(args: &AnnotateArgs) -> Result<AnnotateReport> {
    annotate_files(&args.config, &args.input, args.output.as_deref())
}

fn code_table(table: TableArg) -> &'static CodeTable {
    match table {
        TableArg::Significance => clinical_significance(),
        TableArg::Origin => variant_origin(),
    }
}

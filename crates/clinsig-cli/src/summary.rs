use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use clinsig_cli::annotate::AnnotateReport;

/// Most failures listed on stderr before the rest are counted.
const MAX_LISTED_ERRORS: usize = 20;

pub fn print_summary(report: &AnnotateReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Op"),
        header_cell("Type"),
        header_cell("Written"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for column in &report.columns {
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&column.op),
            Cell::new(column.output_type),
            count_cell(column.written, Color::Green),
            count_cell(column.errors, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(report.records()).add_attribute(Attribute::Bold),
        count_cell(report.column_errors(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");

    if !report.input_errors.is_empty() {
        eprintln!("Skipped input lines:");
        for error in report.input_errors.iter().take(MAX_LISTED_ERRORS) {
            eprintln!("- {error}");
        }
        print_overflow(report.input_errors.len());
    }
    let failures: Vec<String> = report
        .outcomes
        .iter()
        .flat_map(|outcome| {
            let id = outcome.id.as_deref().unwrap_or(".");
            outcome
                .errors
                .iter()
                .map(move |error| format!("{id} {}: {}", error.column, error.error))
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Column errors:");
        for failure in failures.iter().take(MAX_LISTED_ERRORS) {
            eprintln!("- {failure}");
        }
        print_overflow(failures.len());
    }
}

fn print_overflow(total: usize) {
    if total > MAX_LISTED_ERRORS {
        eprintln!("- ... and {} more", total - MAX_LISTED_ERRORS);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

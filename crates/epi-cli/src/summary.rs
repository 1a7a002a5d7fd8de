use std::fmt::Display;

use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use epi_cli::pipeline::IngestReport;
use epi_store::query::{CountrySeries, CountryStats, GlobalTotals};

/// Digest characters shown in the run summary.
const DIGEST_PREFIX: usize = 12;

pub fn print_ingest_summary(report: &IngestReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Dates"),
        header_cell("Keys"),
        header_cell("Zeroed"),
        header_cell("SHA-256"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 2..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for source in &report.sources {
        table.add_row(vec![
            Cell::new(source.metric)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.path.display()),
            Cell::new(source.rows),
            Cell::new(source.date_columns),
            Cell::new(source.keys),
            count_cell(source.recovered_cells, Color::Yellow),
            dim_cell(short_digest(&source.sha256)),
        ]);
    }
    println!("{table}");

    let mut totals = Table::new();
    apply_table_style(&mut totals);
    totals.add_row(vec![header_cell("Facts merged"), Cell::new(report.facts)]);
    totals.add_row(vec![
        header_cell("Countries"),
        Cell::new(format!(
            "{} ({} new)",
            report.commit.countries, report.commit.countries_created
        )),
    ]);
    totals.add_row(vec![
        header_cell("Rows written"),
        Cell::new(report.commit.rows_written)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    totals.add_row(vec![
        header_cell("Elapsed"),
        dim_cell(format!("{} ms", report.elapsed_ms)),
    ]);
    println!("{totals}");
}

pub fn print_latest(date: Option<NaiveDate>) {
    match date {
        Some(date) => println!("{date}"),
        None => println!("no data"),
    }
}

pub fn print_global(totals: &GlobalTotals) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Cases"),
        header_cell("Deaths"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(totals.date),
        Cell::new(totals.cases_cumulative),
        Cell::new(totals.deaths_cumulative),
    ]);
    println!("{table}");
}

pub fn print_country_series(series: &CountrySeries) {
    println!("Country: {}", series.country);
    if series.series.is_empty() {
        println!("no data in range");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Cases"),
        header_cell("Deaths"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for point in &series.series {
        table.add_row(vec![
            Cell::new(point.date),
            Cell::new(point.cases_cumulative),
            Cell::new(point.deaths_cumulative),
        ]);
    }
    println!("{table}");
}

pub fn print_countries(names: &[String]) {
    for name in names {
        println!("{name}");
    }
}

pub fn print_country_stats(title: &str, stats: &[CountryStats]) {
    println!("{title}:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("Cases"),
        header_cell("Deaths"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in stats {
        table.add_row(vec![
            Cell::new(&entry.country)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.cases),
            Cell::new(entry.deaths),
        ]);
    }
    println!("{table}");
}

fn short_digest(digest: &str) -> &str {
    digest.get(..DIGEST_PREFIX).unwrap_or(digest)
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: Display>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

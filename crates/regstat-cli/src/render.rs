//! Terminal and JSON rendering of views.

use std::sync::Arc;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use regstat_common::format_numeric;
use regstat_convert::ConversionReport;
use regstat_ingest::LoadedTable;
use regstat_model::{ChartKind, Dataset, Insight, Tone, View};

use crate::dashboard::ViewData;

/// Width of the bar column at the largest value.
pub const BAR_WIDTH: usize = 40;

const BAR_GLYPH: char = '█';
const LINE_GLYPH: char = '●';

/// JSON shape of a rendered view.
#[derive(Debug, Serialize)]
pub struct ViewReport<'a> {
    pub view: &'static str,
    pub header: &'static str,
    pub title: String,
    pub chart: ChartKind,
    pub category_label: &'static str,
    pub value_label: &'static str,
    #[serde(flatten)]
    pub data: &'a ViewData,
    pub insight: Option<Insight>,
}

impl<'a> ViewReport<'a> {
    pub fn new(view: View, data: &'a ViewData) -> Self {
        let (category_label, value_label) = view.axis_labels();
        Self {
            view: view.slug(),
            header: view.header(),
            title: view.chart_title(data.selection()),
            chart: view.chart(),
            category_label,
            value_label,
            data,
            insight: view.insight(),
        }
    }
}

pub fn print_view(view: View, data: &ViewData) {
    println!("{}", view.header());
    println!();
    if let Some(table) = chart_table(view, data) {
        println!("{}", view.chart_title(data.selection()));
        println!("{table}");
    }
    if let ViewData::Groups {
        selection: None, ..
    } = data
    {
        println!("No states available.");
    }
    for bullet in view.bullets() {
        println!("  • {bullet}");
    }
    if let Some(insight) = view.insight() {
        println!("{}", insight_table(insight));
    }
}

pub fn print_view_json(view: View, data: &ViewData) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&ViewReport::new(view, data))?);
    Ok(())
}

/// Chart of `data` as a table, or `None` for text-only views.
pub fn chart_table(view: View, data: &ViewData) -> Option<Table> {
    match view.chart() {
        ChartKind::Metric => Some(metric_table(data)),
        ChartKind::Bar | ChartKind::Line => Some(series_table(view, data)),
        ChartKind::Text => None,
    }
}

fn metric_table(data: &ViewData) -> Table {
    let points = data.points();
    let mut table = Table::new();
    table.set_header(
        points
            .iter()
            .map(|(label, _)| header_cell(label))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    table.add_row(
        points
            .iter()
            .map(|(_, value)| Cell::new(format_count(*value)).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for index in 0..points.len() {
        align_column(&mut table, index, CellAlignment::Center);
    }
    table
}

fn series_table(view: View, data: &ViewData) -> Table {
    let (category_label, value_label) = view.axis_labels();
    let points = data.points();
    let max = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell(category_label),
        header_cell(value_label),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    if points.is_empty() {
        table.add_row(vec![dim_cell("(no rows)"), dim_cell("-"), dim_cell("")]);
        return table;
    }
    let glyph_cell = |value: f64| match view.chart() {
        ChartKind::Line => Cell::new(line_marker(value, max, BAR_WIDTH)).fg(Color::Magenta),
        _ => Cell::new(bar(value, max, BAR_WIDTH)).fg(Color::Blue),
    };
    for (label, value) in &points {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_count(*value)),
            glyph_cell(*value),
        ]);
    }
    table
}

fn insight_table(insight: Insight) -> Table {
    let color = match insight.tone {
        Tone::Info => Color::Blue,
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new(insight.text).fg(color)]);
    table
}

/// Bar scaled so that `max` fills `width` glyphs. Non-zero values get at
/// least one glyph.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let len = scaled(value, max, width);
    BAR_GLYPH.to_string().repeat(len)
}

/// A single marker at the scaled position of `value`.
pub fn line_marker(value: f64, max: f64, width: usize) -> String {
    let len = scaled(value, max, width).max(1);
    format!("{}{LINE_GLYPH}", " ".repeat(len - 1))
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 || !value.is_finite() {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    len.clamp(1, width)
}

/// Formats a total with thousands separators; fractions keep their digits.
pub fn format_count(value: f64) -> String {
    let text = format_numeric(value);
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rest, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return text;
    }
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn views_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("View"),
        header_cell("Slug"),
        header_cell("Chart"),
    ]);
    apply_table_style(&mut table);
    for view in View::ALL {
        table.add_row(vec![
            Cell::new(view.label()),
            dim_cell(view.slug()),
            Cell::new(chart_name(view.chart())),
        ]);
    }
    table
}

pub fn states_table(states: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("State")]);
    apply_table_style(&mut table);
    for state in states {
        table.add_row(vec![Cell::new(state)]);
    }
    table
}

/// Per-dataset load summary; returns `None` when nothing was skipped.
pub fn load_warnings_table(tables: &[(Dataset, Arc<LoadedTable>)]) -> Option<Table> {
    if tables.iter().all(|(_, table)| !table.has_warnings()) {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dataset"), header_cell("Warning")]);
    apply_table_style(&mut table);
    for (dataset, loaded) in tables {
        for warning in &loaded.warnings {
            table.add_row(vec![
                Cell::new(dataset.as_str()),
                Cell::new(warning.to_string()).fg(Color::Yellow),
            ]);
        }
    }
    Some(table)
}

pub fn conversion_table(report: &ConversionReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Output"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for file in &report.converted {
        table.add_row(vec![
            Cell::new(file.source.display()),
            Cell::new(file.output.display()),
            Cell::new(file.rows),
        ]);
    }
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(failure.source.display()),
            Cell::new(failure.error.to_string()).fg(Color::Red),
            dim_cell("-"),
        ]);
    }
    if report.converted.is_empty() && report.failures.is_empty() {
        table.add_row(vec![dim_cell("(no spreadsheets)"), dim_cell("-"), dim_cell("-")]);
    }
    table
}

fn chart_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "bar",
        ChartKind::Line => "line",
        ChartKind::Metric => "metrics",
        ChartKind::Text => "text",
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

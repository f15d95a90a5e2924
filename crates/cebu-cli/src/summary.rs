use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cebu_model::Value;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult, preview_rows: usize) {
    println!("Recipe: {}", result.recipe);
    println!("Data: {}", result.data_dir.display());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("File"),
        header_cell("Rows read"),
        header_cell("Columns read"),
        header_cell("Rows selected"),
        header_cell("Rows after join"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stage in &result.stages {
        let file = stage
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| stage.file.display().to_string());
        table.add_row(vec![
            Cell::new(&stage.source)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(file),
            Cell::new(stage.rows_read),
            Cell::new(stage.columns_read),
            dropped_cell(stage.rows_selected, stage.rows_read),
            Cell::new(stage.rows_joined),
        ]);
    }
    table.add_row(vec![
        Cell::new("RESULT")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} columns", result.table.width())),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.table.height()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Completed in {} ms", result.duration.as_millis());
    if preview_rows > 0 {
        print_preview(result, preview_rows);
    }
}

fn print_preview(result: &RunResult, preview_rows: usize) {
    let mut table = Table::new();
    table.set_header(result.table.column_names().map(header_cell).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for (index, field) in result.table.fields().iter().enumerate() {
        if field.ty.is_numeric() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in result.table.rows().iter().take(preview_rows) {
        table.add_row(row.iter().map(value_cell).collect::<Vec<_>>());
    }
    println!();
    println!(
        "Preview ({} of {} rows):",
        preview_rows.min(result.table.height()),
        result.table.height()
    );
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dropped_cell(kept: usize, read: usize) -> Cell {
    if kept < read {
        Cell::new(kept).fg(Color::Yellow)
    } else {
        Cell::new(kept)
    }
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Missing => dim_cell("NA"),
        other => Cell::new(other),
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

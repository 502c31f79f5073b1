use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cleanse_cli::run::CleanRun;
use cleanse_model::{StepReport, StepStatus};

pub fn print_summary(run: &CleanRun) {
    let report = &run.report;
    println!("Input: {}", run.input.display());
    match &run.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!(
        "Rows: {} -> {}   Columns: {} -> {}",
        report.rows_before, report.rows_after, report.columns_before, report.columns_after
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Step"),
        header_cell("Status"),
        header_cell("Rows removed"),
        header_cell("Cells changed"),
        header_cell("Diagnostics"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_changed = 0usize;
    for (idx, step) in report.steps.iter().enumerate() {
        total_changed += step.outcome.cells_changed;
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(&step.step),
            status_cell(step.outcome.status),
            count_cell(step.outcome.rows_removed, Color::Yellow),
            count_cell(step.outcome.cells_changed, Color::Green),
            diagnostics_cell(step),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(report.rows_removed(), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_changed, Color::Green).add_attribute(Attribute::Bold),
        dim_cell(format!("{} skipped", report.skipped_steps().len())),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn status_cell(status: StepStatus) -> Cell {
    match status {
        StepStatus::Applied => Cell::new(status.as_str()).fg(Color::Green),
        StepStatus::Skipped => Cell::new(status.as_str())
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    }
}

fn diagnostics_cell(step: &StepReport) -> Cell {
    if step.outcome.diagnostics.is_empty() {
        return dim_cell("-");
    }
    let text = step
        .outcome
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Cell::new(text).fg(Color::Yellow)
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

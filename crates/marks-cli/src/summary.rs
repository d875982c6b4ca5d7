//! Dispatch summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{DispatchStatus, NotifyResult};

pub fn print_summary(result: &NotifyResult) {
    if result.dry_run {
        println!("Dry run: messages were printed, nothing was transmitted.");
    } else if let Some(outbox) = &result.outbox {
        println!("Outbox: {}", outbox.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Student"),
        header_cell("Email"),
        header_cell("Announced"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    let mut total_announced = 0usize;
    for summary in &result.students {
        // A nameless row has no notification surface; keep it out of the table.
        if summary.name.is_empty() {
            continue;
        }
        total_announced += summary.announced;
        let student = if summary.surname.is_empty() {
            summary.name.clone()
        } else {
            format!("{} {}", summary.name, summary.surname)
        };
        table.add_row(vec![
            Cell::new(student),
            Cell::new(summary.email.clone()),
            Cell::new(format!("{}/{}", summary.announced, summary.marked)),
            status_cell(summary.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_announced).add_attribute(Attribute::Bold),
        count_status_cell(result),
    ]);
    println!("{table}");
    if !result.report.failures.is_empty() {
        eprintln!("Failures:");
        for failure in &result.report.failures {
            eprintln!("- {}: {}", failure.address, failure.message);
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: DispatchStatus) -> Cell {
    match status {
        DispatchStatus::Sent => Cell::new("sent")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        DispatchStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        DispatchStatus::Skipped => dim_cell("-"),
    }
}

fn count_status_cell(result: &NotifyResult) -> Cell {
    let failures = result.report.failures.len();
    if failures > 0 {
        Cell::new(format!("{failures} failed"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(format!("{} sent", result.report.sent.len())).fg(Color::Green)
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

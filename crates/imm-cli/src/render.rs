//! Terminal tables for schedules, recommendations and pipeline summaries.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use imm_model::{
    AllSchedules, FormattedIapEntry, NIP_CATEGORY, NipScheduleEntry, Recommendation, ScheduleType,
};

use crate::types::ExtractionResult;

/// How tables are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Rounded UTF-8 borders with colors.
    Rich,
    /// Plain Markdown, no colors.
    Markdown,
}

struct TableBuilder {
    table: Table,
    style: TableStyle,
}

impl TableBuilder {
    fn new(style: TableStyle, headers: &[&str]) -> Self {
        let mut table = Table::new();
        match style {
            TableStyle::Rich => {
                table.set_header(headers.iter().map(|label| header_cell(label)));
                apply_table_style(&mut table);
            }
            TableStyle::Markdown => {
                table.load_preset(ASCII_MARKDOWN).force_no_tty();
                table.set_header(headers.iter().copied());
            }
        }
        Self { table, style }
    }

    fn text(&self, value: &str) -> Cell {
        Cell::new(value)
    }

    fn optional(&self, value: Option<&str>) -> Cell {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => Cell::new(value),
            None => self.dim("-"),
        }
    }

    fn dim(&self, value: &str) -> Cell {
        match self.style {
            TableStyle::Rich => Cell::new(value).fg(Color::DarkGrey),
            TableStyle::Markdown => Cell::new(value),
        }
    }

    fn emphasis(&self, value: &str, color: Color) -> Cell {
        match self.style {
            TableStyle::Rich => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
            TableStyle::Markdown => Cell::new(value),
        }
    }

    fn count(&self, value: usize) -> Cell {
        match (self.style, value) {
            (TableStyle::Rich, 0) => Cell::new(value).fg(Color::Yellow),
            _ => Cell::new(value),
        }
    }

    /// Markdown output keeps every column left-aligned.
    fn align(&mut self, index: usize, alignment: CellAlignment) {
        if self.style == TableStyle::Markdown {
            return;
        }
        if let Some(column) = self.table.column_mut(index) {
            column.set_cell_alignment(alignment);
        }
    }

    fn finish(self) -> Table {
        self.table
    }
}

fn program_color(schedule_type: ScheduleType) -> Color {
    match schedule_type {
        ScheduleType::Nip => Color::Blue,
        ScheduleType::Iap => Color::Magenta,
    }
}

pub fn recommendation_table(recommendations: &[Recommendation], style: TableStyle) -> Table {
    let mut builder = TableBuilder::new(
        style,
        &["Vaccine", "Program", "Category", "Due age", "Dose", "Route", "Site"],
    );
    for rec in recommendations {
        let due = if rec.is_annual() {
            builder.emphasis(&rec.due_age, Color::Green)
        } else {
            builder.text(&rec.due_age)
        };
        let row = vec![
            builder.emphasis(&rec.vaccine, Color::Cyan),
            builder.emphasis(rec.schedule_type.as_str(), program_color(rec.schedule_type)),
            builder.text(&rec.category),
            due,
            builder.optional(rec.dose.as_deref()),
            builder.optional(rec.route.as_deref()),
            builder.optional(rec.site.as_deref()),
        ];
        builder.table.add_row(row);
    }
    builder.align(1, CellAlignment::Center);
    builder.finish()
}

pub fn nip_schedule_table(entries: &[NipScheduleEntry], style: TableStyle) -> Table {
    let mut builder = TableBuilder::new(
        style,
        &["Vaccine", "Due age", "Max age", "Dose", "Route", "Site"],
    );
    for entry in entries {
        let row = vec![
            builder.emphasis(&entry.vaccine, Color::Cyan),
            builder.text(&entry.due_age),
            builder.optional(entry.max_age.as_deref()),
            builder.optional(Some(entry.dose.as_str())),
            builder.optional(Some(entry.route.as_str())),
            builder.optional(Some(entry.site.as_str())),
        ];
        builder.table.add_row(row);
    }
    builder.finish()
}

pub fn iap_schedule_table(entries: &[FormattedIapEntry], style: TableStyle) -> Table {
    let mut builder = TableBuilder::new(style, &["Vaccine", "Category", "Schedule"]);
    for entry in entries {
        let row = vec![
            builder.emphasis(&entry.vaccine, Color::Cyan),
            builder.text(&entry.category),
            builder.text(&entry.schedule),
        ];
        builder.table.add_row(row);
    }
    builder.finish()
}

/// Both programmes in one table; IAP ages are shown as raw tokens.
pub fn compare_table(all: &AllSchedules<'_>, style: TableStyle) -> Table {
    let mut builder = TableBuilder::new(style, &["Program", "Vaccine", "Category", "Ages"]);
    if style == TableStyle::Rich {
        apply_compare_table_style(&mut builder.table);
    }
    for entry in all.nip {
        let ages = match entry.max_age.as_deref() {
            Some(max) => format!("{} (until {max})", entry.due_age),
            None => entry.due_age.clone(),
        };
        let row = vec![
            builder.emphasis(ScheduleType::Nip.as_str(), program_color(ScheduleType::Nip)),
            builder.emphasis(&entry.vaccine, Color::Cyan),
            builder.text(NIP_CATEGORY),
            builder.text(&ages),
        ];
        builder.table.add_row(row);
    }
    for vaccine in all.iap {
        let row = vec![
            builder.emphasis(ScheduleType::Iap.as_str(), program_color(ScheduleType::Iap)),
            builder.emphasis(&vaccine.vaccine, Color::Cyan),
            builder.text(&vaccine.category),
            builder.text(&vaccine.schedule.join(", ")),
        ];
        builder.table.add_row(row);
    }
    builder.align(0, CellAlignment::Center);
    builder.finish()
}

pub fn extraction_table(result: &ExtractionResult, style: TableStyle) -> Table {
    let mut builder = TableBuilder::new(
        style,
        &["Schedule", "Source", "Lines", "Records", "Output"],
    );
    for table in &result.tables {
        let output = table
            .output
            .as_ref()
            .map(|path| path.display().to_string());
        let row = vec![
            builder.emphasis(table.schedule, Color::Blue),
            builder.text(&table.source.display().to_string()),
            Cell::new(table.line_count),
            builder.count(table.record_count),
            builder.optional(output.as_deref()),
        ];
        builder.table.add_row(row);
    }
    builder.align(2, CellAlignment::Right);
    builder.align(3, CellAlignment::Right);
    builder.finish()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Heavier style for side-by-side comparisons.
fn apply_compare_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

//! Linear (NIP) table reconstruction from OCR lines.
//!
//! Each content line is split on runs of two or more whitespace characters.
//! A line with at least four columns opens a new record
//! `(vaccine, when to give, dose, route[, site])`; a shorter line continues
//! the vaccine name of the most recently emitted record, which is how names
//! wrapped over two OCR lines are rejoined. Header lines (containing
//! "Vaccine") and separator rules are skipped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use imm_model::VaccineRecord;

use crate::normalize::is_separator_line;

static COLUMN_GAP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid column gap regex"));

/// Literal marker of the table header row.
pub const HEADER_MARKER: &str = "Vaccine";

const MIN_RECORD_COLUMNS: usize = 4;

/// Parser state between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinearState {
    #[default]
    NoOpenRecord,
    Building {
        vaccine: String,
    },
}

/// What a single line does to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearAction {
    Skip,
    Emit(VaccineRecord),
    /// Append this text to the last emitted record's vaccine name.
    ContinueName(String),
    /// Continuation text with no record to attach to.
    Drop(String),
}

/// Split a line into columns on whitespace runs of length two or more.
pub fn split_columns(line: &str) -> Vec<&str> {
    COLUMN_GAP_REGEX.split(line.trim()).collect()
}

/// Pure transition: the next state and the action for `line`.
pub fn transition(state: &LinearState, line: &str) -> (LinearState, LinearAction) {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.contains(HEADER_MARKER) || is_separator_line(trimmed) {
        return (state.clone(), LinearAction::Skip);
    }
    let columns = split_columns(trimmed);
    if columns.len() >= MIN_RECORD_COLUMNS {
        let record = VaccineRecord::new(
            columns[0],
            columns[1],
            columns[2],
            columns[3],
            columns.get(4).copied().unwrap_or(""),
        );
        let next = LinearState::Building {
            vaccine: columns[0].to_string(),
        };
        return (next, LinearAction::Emit(record));
    }
    let text = columns[0].to_string();
    match state {
        LinearState::NoOpenRecord => (LinearState::NoOpenRecord, LinearAction::Drop(text)),
        LinearState::Building { .. } => (state.clone(), LinearAction::ContinueName(text)),
    }
}

/// Line-by-line builder over [`transition`].
#[derive(Debug, Default)]
pub struct LinearTableParser {
    state: LinearState,
    records: Vec<VaccineRecord>,
}

impl LinearTableParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LinearState {
        &self.state
    }

    pub fn records(&self) -> &[VaccineRecord] {
        &self.records
    }

    pub fn push_line(&mut self, line: &str) {
        let (next, action) = transition(&self.state, line);
        self.state = next;
        match action {
            LinearAction::Skip => {}
            LinearAction::Emit(record) => self.records.push(record),
            LinearAction::ContinueName(text) => match self.records.last_mut() {
                Some(last) => {
                    last.vaccine.push(' ');
                    last.vaccine.push_str(&text);
                }
                None => trace!("dropping continuation without an open record"),
            },
            LinearAction::Drop(_) => trace!("dropping continuation without an open record"),
        }
    }

    pub fn finish(self) -> Vec<VaccineRecord> {
        self.records
    }
}

/// Parse a whole NIP page into records, in document order.
pub fn parse_nip_table<S: AsRef<str>>(lines: &[S]) -> Vec<VaccineRecord> {
    let mut parser = LinearTableParser::new();
    for line in lines {
        parser.push_line(line.as_ref());
    }
    let records = parser.finish();
    debug!(
        line_count = lines.len(),
        record_count = records.len(),
        "parsed NIP table"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_wide_gaps_only() {
        assert_eq!(
            split_columns("  Hepatitis B   At birth  0.5 ml   IM  "),
            vec!["Hepatitis B", "At birth", "0.5 ml", "IM"]
        );
        assert_eq!(split_columns("single line"), vec!["single line"]);
    }

    #[test]
    fn wide_row_opens_record() {
        let (state, action) =
            transition(&LinearState::NoOpenRecord, "BCG  At birth  0.1ml  ID  Left arm");
        assert_eq!(
            state,
            LinearState::Building {
                vaccine: "BCG".to_string()
            }
        );
        assert_eq!(
            action,
            LinearAction::Emit(VaccineRecord::new(
                "BCG", "At birth", "0.1ml", "ID", "Left arm"
            ))
        );
    }

    #[test]
    fn site_is_optional() {
        let (_, action) = transition(&LinearState::NoOpenRecord, "OPV  At birth  2 drops  Oral");
        let LinearAction::Emit(record) = action else {
            panic!("expected a record");
        };
        assert_eq!(record.site, "");
    }

    #[test]
    fn narrow_row_continues_or_drops() {
        let building = LinearState::Building {
            vaccine: "Pentavalent".to_string(),
        };
        assert_eq!(
            transition(&building, "(DPT+HepB+Hib)"),
            (building.clone(), LinearAction::ContinueName("(DPT+HepB+Hib)".to_string()))
        );
        assert_eq!(
            transition(&LinearState::NoOpenRecord, "orphan"),
            (
                LinearState::NoOpenRecord,
                LinearAction::Drop("orphan".to_string())
            )
        );
    }

    #[test]
    fn headers_and_separators_are_skipped() {
        let building = LinearState::Building {
            vaccine: "BCG".to_string(),
        };
        assert_eq!(
            transition(&building, "Vaccine  When to give  Dose  Route  Site").1,
            LinearAction::Skip
        );
        assert_eq!(transition(&building, "|-----+-----|").1, LinearAction::Skip);
        assert_eq!(transition(&building, "   ").1, LinearAction::Skip);
    }
}

//! Matrix (IAP) table reconstruction from OCR lines.
//!
//! The parser seeks a header line containing "Vaccine" and at least one
//! anchor age token, reads the ordered age columns from it, then flattens
//! every body line into `(vaccine, age, dose code)` entries.
//!
//! Dose codes are runs of two or more uppercase letters with optional
//! trailing digits. The i-th code on a line is paired with the i-th age
//! column in scan order, not by horizontal position, so a wrapped or
//! partially recognised line can shift codes into the wrong column. Codes
//! beyond the last column are dropped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use imm_model::MatrixEntry;

use crate::normalize::is_separator_line;
use crate::nip_table::HEADER_MARKER;
use crate::vocabulary::VaccineVocabulary;

static AGE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:birth|\d+[wmdy])\b").expect("Invalid age token regex"));

static DOSE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,}\d*").expect("Invalid dose code regex"));

/// Tokens that must appear on the header line besides the marker.
pub const HEADER_ANCHORS: &[&str] = &["birth", "6w", "10w"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MatrixState {
    #[default]
    SeekingHeader,
    InTable {
        age_headers: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixAction {
    Skip,
    /// Header found; these are the age columns.
    EnterTable(Vec<String>),
    Emit(Vec<MatrixEntry>),
}

/// True when `line` is the matrix header row.
pub fn is_header_line(line: &str) -> bool {
    if !line.contains(HEADER_MARKER) {
        return false;
    }
    let lower = line.to_lowercase();
    HEADER_ANCHORS.iter().any(|anchor| lower.contains(anchor))
}

/// Ordered age tokens (`birth`, `6w`, `9m`, ...) of a header line, lowercased.
pub fn extract_age_headers(line: &str) -> Vec<String> {
    let lower = line.to_lowercase();
    AGE_TOKEN_REGEX
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Leading vaccine name: the text before the first dose code, trimmed.
pub fn leading_vaccine_name(line: &str) -> &str {
    let end = DOSE_CODE_REGEX
        .find(line)
        .map_or(line.len(), |m| m.start());
    line[..end].trim()
}

/// Dose codes of a body line, in scan order.
pub fn dose_codes(line: &str) -> Vec<&str> {
    DOSE_CODE_REGEX.find_iter(line).map(|m| m.as_str()).collect()
}

/// Pair dose codes with age columns by position; extra codes are dropped.
pub fn pair_with_headers(
    vaccine: &str,
    codes: &[&str],
    age_headers: &[String],
) -> Vec<MatrixEntry> {
    codes
        .iter()
        .zip(age_headers)
        .map(|(code, age)| MatrixEntry::new(vaccine, age.as_str(), *code))
        .collect()
}

/// Pure transition for one line.
///
/// With a vocabulary, the leading name is replaced by its canonical form and
/// lines whose name is not recognised are skipped.
pub fn transition(
    state: &MatrixState,
    line: &str,
    vocabulary: Option<&VaccineVocabulary>,
) -> (MatrixState, MatrixAction) {
    let trimmed = line.trim();
    match state {
        MatrixState::SeekingHeader => {
            if is_header_line(trimmed) {
                let age_headers = extract_age_headers(trimmed);
                (
                    MatrixState::InTable {
                        age_headers: age_headers.clone(),
                    },
                    MatrixAction::EnterTable(age_headers),
                )
            } else {
                (MatrixState::SeekingHeader, MatrixAction::Skip)
            }
        }
        MatrixState::InTable { age_headers } => {
            if trimmed.is_empty() || is_separator_line(trimmed) {
                return (state.clone(), MatrixAction::Skip);
            }
            let raw_name = leading_vaccine_name(trimmed);
            if raw_name.is_empty() {
                return (state.clone(), MatrixAction::Skip);
            }
            let vaccine = match vocabulary {
                Some(vocabulary) => match vocabulary.match_name(raw_name) {
                    Some(canonical) => canonical,
                    None => return (state.clone(), MatrixAction::Skip),
                },
                None => raw_name,
            };
            let codes = dose_codes(trimmed);
            let entries = pair_with_headers(vaccine, &codes, age_headers);
            (state.clone(), MatrixAction::Emit(entries))
        }
    }
}

#[derive(Debug, Default)]
pub struct MatrixTableParser<'v> {
    state: MatrixState,
    vocabulary: Option<&'v VaccineVocabulary>,
    entries: Vec<MatrixEntry>,
}

impl<'v> MatrixTableParser<'v> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: &'v VaccineVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn state(&self) -> &MatrixState {
        &self.state
    }

    pub fn push_line(&mut self, line: &str) {
        let (next, action) = transition(&self.state, line, self.vocabulary);
        self.state = next;
        match action {
            MatrixAction::Skip => {}
            MatrixAction::EnterTable(age_headers) => {
                debug!(age_headers = ?age_headers, "found IAP header row");
            }
            MatrixAction::Emit(entries) => {
                trace!(entry_count = entries.len(), "matrix row");
                self.entries.extend(entries);
            }
        }
    }

    pub fn finish(self) -> Vec<MatrixEntry> {
        self.entries
    }
}

/// Parse a whole IAP page into long-format entries.
pub fn parse_iap_matrix<S: AsRef<str>>(
    lines: &[S],
    vocabulary: Option<&VaccineVocabulary>,
) -> Vec<MatrixEntry> {
    let mut parser = MatrixTableParser::new();
    if let Some(vocabulary) = vocabulary {
        parser = parser.with_vocabulary(vocabulary);
    }
    for line in lines {
        parser.push_line(line.as_ref());
    }
    let found_header = matches!(parser.state(), MatrixState::InTable { .. });
    let entries = parser.finish();
    debug!(
        line_count = lines.len(),
        found_header,
        entry_count = entries.len(),
        "parsed IAP matrix"
    );
    entries
}

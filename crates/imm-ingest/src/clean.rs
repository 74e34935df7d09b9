//! Row-oriented clean-up of a malformed NIP table.
//!
//! OCR output imported through a spreadsheet tends to scatter one vaccine
//! over several ragged rows. Rows are folded into one record per canonical
//! vaccine:
//!
//! 1. A row with any cell recognised by the vocabulary opens (or resets) the
//!    record for that vaccine.
//! 2. While a record is open, each non-empty normalized cell is appended to
//!    the field named by its column. A `Vaccine` cell on a row without a
//!    vocabulary hit extends the vaccine name.
//! 3. Each record is then tidied: the word "dose" is removed from Dose, When
//!    to give is reduced to the sorted set of age phrases it mentions, and
//!    Dose/Route/Site get whitespace collapsed and Left/Right capitalized.
//!
//! Records keep the order in which each vaccine was first seen.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use imm_model::VaccineRecord;

use crate::csv_table::RawTable;
use crate::normalize::{capitalize_sides, normalize_text};
use crate::vocabulary::VaccineVocabulary;

static DOSE_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dose\s*").expect("Invalid dose word regex"));

static AGE_PHRASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(?:days?|weeks?|months?|years?)|at\s*birth|first\s*\d+\s*days?")
        .expect("Invalid age phrase regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Vaccine,
    WhenToGive,
    Dose,
    Route,
    Site,
}

impl Field {
    fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        [
            ("Vaccine", Self::Vaccine),
            ("When to give", Self::WhenToGive),
            ("Dose", Self::Dose),
            ("Route", Self::Route),
            ("Site", Self::Site),
        ]
        .into_iter()
        .find(|(name, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, field)| field)
    }
}

fn append(target: &mut String, value: &str) {
    target.push(' ');
    target.push_str(value);
}

/// Distinct age phrases of `text`, sorted and joined with ", ".
pub fn extract_age_phrases(text: &str) -> Option<String> {
    let phrases: BTreeSet<&str> = AGE_PHRASE_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if phrases.is_empty() {
        None
    } else {
        Some(phrases.into_iter().collect::<Vec<_>>().join(", "))
    }
}

fn tidy_field(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize_sides(&collapsed)
}

fn finalize(record: &VaccineRecord) -> VaccineRecord {
    let dose = if record.dose.to_lowercase().contains("dose") {
        DOSE_WORD_REGEX.replace_all(&record.dose, "").into_owned()
    } else {
        record.dose.clone()
    };
    let when_to_give =
        extract_age_phrases(&record.when_to_give).unwrap_or_else(|| record.when_to_give.clone());
    VaccineRecord {
        vaccine: record.vaccine.trim().to_string(),
        when_to_give: when_to_give.trim().to_string(),
        dose: tidy_field(&dose),
        route: tidy_field(&record.route),
        site: tidy_field(&record.site),
        max_age: record.max_age.clone(),
    }
}

/// Fold a malformed NIP table into one clean record per recognised vaccine.
pub fn clean_nip_table(table: &RawTable, vocabulary: &VaccineVocabulary) -> Vec<VaccineRecord> {
    let fields: Vec<Option<Field>> = table
        .headers
        .iter()
        .map(String::as_str)
        .map(Field::from_header)
        .collect();
    let mut records: Vec<VaccineRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for row in &table.rows {
        let found = row.iter().find_map(|cell| vocabulary.match_name(cell));
        if let Some(name) = found {
            let fresh = VaccineRecord::new(name, "", "", "", "");
            let index = match positions.get(name) {
                Some(&index) => {
                    records[index] = fresh;
                    index
                }
                None => {
                    records.push(fresh);
                    positions.insert(name.to_string(), records.len() - 1);
                    records.len() - 1
                }
            };
            current = Some(index);
        }
        let Some(index) = current else {
            continue;
        };
        let record = &mut records[index];
        for (cell, field) in row.iter().zip(&fields) {
            let value = normalize_text(cell);
            if value.is_empty() {
                continue;
            }
            match field {
                Some(Field::WhenToGive) => append(&mut record.when_to_give, &value),
                Some(Field::Dose) => append(&mut record.dose, &value),
                Some(Field::Route) => append(&mut record.route, &value),
                Some(Field::Site) => append(&mut record.site, &value),
                Some(Field::Vaccine) if found.is_none() => append(&mut record.vaccine, &value),
                _ => {}
            }
        }
    }

    let cleaned: Vec<VaccineRecord> = records.iter().map(finalize).collect();
    debug!(
        row_count = table.rows.len(),
        record_count = cleaned.len(),
        "cleaned NIP table"
    );
    cleaned
}

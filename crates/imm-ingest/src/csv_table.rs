//! Intermediate CSV tables written after extraction.
//!
//! - NIP: `Vaccine, When to give, Dose, Route, Site`
//! - IAP: `Vaccine, Age, Dose` (long format, one row per dose cell)
//!
//! Every cell is passed through [`normalize_text`] on save. Saving nothing is
//! a logged no-op.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use imm_model::{MatrixEntry, VaccineRecord};

use crate::error::{IngestError, Result};
use crate::normalize::normalize_text;

pub const NIP_TABLE_FILE: &str = "nip_schedule.csv";
pub const IAP_TABLE_FILE: &str = "iap_schedule.csv";

/// Headerful table read without a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::io(parent, e))?;
    }
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| IngestError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IngestError::io(path, e))?;
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record.map_err(|e| IngestError::csv(path, e))?);
    }
    Ok(rows)
}

/// Save NIP records; returns `false` when there was nothing to save.
pub fn write_nip_table(path: &Path, records: &[VaccineRecord]) -> Result<bool> {
    if records.is_empty() {
        warn!(path = %path.display(), "no NIP records to save");
        return Ok(false);
    }
    let cleaned: Vec<VaccineRecord> = records
        .iter()
        .map(|record| record.map_cells(normalize_text))
        .collect();
    write_rows(path, &cleaned)?;
    info!(path = %path.display(), record_count = cleaned.len(), "saved NIP table");
    Ok(true)
}

/// Save IAP matrix entries; returns `false` when there was nothing to save.
pub fn write_iap_table(path: &Path, entries: &[MatrixEntry]) -> Result<bool> {
    if entries.is_empty() {
        warn!(path = %path.display(), "no IAP entries to save");
        return Ok(false);
    }
    let cleaned: Vec<MatrixEntry> = entries
        .iter()
        .map(|entry| entry.map_cells(normalize_text))
        .collect();
    write_rows(path, &cleaned)?;
    info!(path = %path.display(), entry_count = cleaned.len(), "saved IAP table");
    Ok(true)
}

pub fn read_nip_table(path: &Path) -> Result<Vec<VaccineRecord>> {
    read_rows(path)
}

pub fn read_iap_table(path: &Path) -> Result<Vec<MatrixEntry>> {
    read_rows(path)
}

/// Read a possibly malformed table: first row is the header, rows wider
/// than the header are skipped and narrower rows are padded.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| IngestError::csv(path, e))?
            .iter()
            .map(normalize_header)
            .collect(),
        None => return Ok(RawTable::default()),
    };
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        if record.len() > headers.len() {
            skipped += 1;
            continue;
        }
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    if skipped > 0 {
        debug!(path = %path.display(), skipped, "skipped rows wider than the header");
    }
    Ok(RawTable { headers, rows })
}

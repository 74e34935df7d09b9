//! Extraction and build pipelines with explicit stages.
//!
//! Extraction:
//! 1. **OCR**: turn each source into trimmed text lines
//! 2. **Parse**: linear parser for NIP, matrix parser for IAP
//! 3. **Save**: normalize every cell and write the intermediate CSV tables
//!
//! Build:
//! 1. **Read**: load the intermediate CSV tables
//! 2. **Assemble**: NIP entries and grouped IAP vaccines
//! 3. **Write**: pretty JSON definitions into the output directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace, warn};

use imm_ingest::{
    IAP_TABLE_FILE, NIP_TABLE_FILE, OcrEngine, VaccineVocabulary, clean_nip_table,
    parse_iap_matrix, parse_nip_table, read_iap_table, read_nip_table, read_raw_table,
    write_iap_table, write_nip_table,
};
use imm_standards::{
    IAP_SCHEDULE_FILE, NIP_SCHEDULE_FILE, build_iap_definition, build_nip_definition,
    write_definition,
};

use crate::logging::redact_value;
use crate::types::{BuildResult, CleanResult, ExtractionResult, TableSummary};

/// Inputs of the extraction pipeline.
#[derive(Debug)]
pub struct ExtractionConfig<'a> {
    pub nip_source: PathBuf,
    pub iap_source: PathBuf,
    pub output_dir: PathBuf,
    /// Canonicalize IAP vaccine names through this vocabulary.
    pub vocabulary: Option<&'a VaccineVocabulary>,
}

/// The built-in vocabulary, or the TOML file at `path`.
pub fn load_vocabulary(path: Option<&Path>) -> Result<VaccineVocabulary> {
    match path {
        Some(path) => VaccineVocabulary::load(path)
            .with_context(|| format!("load vocabulary: {}", path.display())),
        None => Ok(VaccineVocabulary::default()),
    }
}

// ============================================================================
// Stage 1: OCR
// ============================================================================

pub fn read_lines(engine: &dyn OcrEngine, source: &Path) -> Result<Vec<String>> {
    let lines = engine
        .extract_lines(source)
        .with_context(|| format!("read OCR source: {}", source.display()))?;
    for (index, line) in lines.iter().enumerate() {
        trace!(line_number = index + 1, line = %redact_value(line), "ocr line");
    }
    Ok(lines)
}

// ============================================================================
// Stages 2-3: Parse and save
// ============================================================================

pub fn extract_nip(
    engine: &dyn OcrEngine,
    source: &Path,
    output_dir: &Path,
) -> Result<TableSummary> {
    let span = info_span!("extract_nip", source = %source.display());
    let _guard = span.enter();
    let start = Instant::now();

    let lines = read_lines(engine, source)?;
    let records = parse_nip_table(&lines);
    if records.is_empty() {
        warn!(line_count = lines.len(), "no NIP records found");
    }
    let path = output_dir.join(NIP_TABLE_FILE);
    let saved = write_nip_table(&path, &records)
        .with_context(|| format!("save NIP table: {}", path.display()))?;
    info!(
        record_count = records.len(),
        saved,
        elapsed_ms = start.elapsed().as_millis(),
        "NIP extraction complete"
    );
    Ok(TableSummary {
        schedule: "NIP",
        source: source.to_path_buf(),
        line_count: lines.len(),
        record_count: records.len(),
        output: saved.then_some(path),
    })
}

pub fn extract_iap(
    engine: &dyn OcrEngine,
    source: &Path,
    output_dir: &Path,
    vocabulary: Option<&VaccineVocabulary>,
) -> Result<TableSummary> {
    let span = info_span!("extract_iap", source = %source.display());
    let _guard = span.enter();
    let start = Instant::now();

    let lines = read_lines(engine, source)?;
    let entries = parse_iap_matrix(&lines, vocabulary);
    if entries.is_empty() {
        warn!(line_count = lines.len(), "no IAP entries found");
    }
    let path = output_dir.join(IAP_TABLE_FILE);
    let saved = write_iap_table(&path, &entries)
        .with_context(|| format!("save IAP table: {}", path.display()))?;
    info!(
        entry_count = entries.len(),
        saved,
        elapsed_ms = start.elapsed().as_millis(),
        "IAP extraction complete"
    );
    Ok(TableSummary {
        schedule: "IAP",
        source: source.to_path_buf(),
        line_count: lines.len(),
        record_count: entries.len(),
        output: saved.then_some(path),
    })
}

pub fn run_extraction(
    engine: &dyn OcrEngine,
    config: &ExtractionConfig<'_>,
) -> Result<ExtractionResult> {
    let nip = extract_nip(engine, &config.nip_source, &config.output_dir)?;
    let iap = extract_iap(
        engine,
        &config.iap_source,
        &config.output_dir,
        config.vocabulary,
    )?;
    Ok(ExtractionResult {
        output_dir: config.output_dir.clone(),
        tables: vec![nip, iap],
    })
}

// ============================================================================
// Cleaning
// ============================================================================

/// `<dir>/<stem>_cleaned.csv` next to the input.
pub fn default_clean_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("nip_schedule");
    input.with_file_name(format!("{stem}_cleaned.csv"))
}

pub fn clean_table(
    input: &Path,
    output: &Path,
    vocabulary: &VaccineVocabulary,
) -> Result<CleanResult> {
    let span = info_span!("clean", input = %input.display());
    let _guard = span.enter();

    let table =
        read_raw_table(input).with_context(|| format!("read table: {}", input.display()))?;
    let records = clean_nip_table(&table, vocabulary);
    if records.is_empty() {
        warn!(row_count = table.rows.len(), "no vaccines recognised");
    }
    let saved = write_nip_table(output, &records)
        .with_context(|| format!("save cleaned table: {}", output.display()))?;
    Ok(CleanResult {
        input: input.to_path_buf(),
        output: saved.then(|| output.to_path_buf()),
        row_count: table.rows.len(),
        record_count: records.len(),
    })
}

// ============================================================================
// Build
// ============================================================================

/// Vaccine-to-category map from a JSON object file; empty without a path.
pub fn load_categories(path: Option<&Path>) -> Result<BTreeMap<String, String>> {
    let Some(path) = path else {
        return Ok(BTreeMap::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read categories: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse categories: {}", path.display()))
}

pub fn build_definitions(
    nip_csv: &Path,
    iap_csv: &Path,
    categories: &BTreeMap<String, String>,
    output_dir: &Path,
) -> Result<BuildResult> {
    let span = info_span!("build", output_dir = %output_dir.display());
    let _guard = span.enter();

    let records =
        read_nip_table(nip_csv).with_context(|| format!("read NIP table: {}", nip_csv.display()))?;
    let entries =
        read_iap_table(iap_csv).with_context(|| format!("read IAP table: {}", iap_csv.display()))?;

    let nip = build_nip_definition(&records);
    let iap = build_iap_definition(&entries, categories);

    let nip_definition = output_dir.join(NIP_SCHEDULE_FILE);
    let iap_definition = output_dir.join(IAP_SCHEDULE_FILE);
    write_definition(&nip_definition, &nip).context("write NIP definition")?;
    write_definition(&iap_definition, &iap).context("write IAP definition")?;
    info!(
        nip_entries = nip.schedule.len(),
        iap_vaccines = iap.schedule.len(),
        "schedule definitions written"
    );

    Ok(BuildResult {
        nip_definition,
        iap_definition,
        nip_entries: nip.schedule.len(),
        iap_vaccines: iap.schedule.len(),
        categories: iap.categories,
    })
}

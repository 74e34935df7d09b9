use std::path::PathBuf;

/// Outcome of one table extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub schedule: &'static str,
    pub source: PathBuf,
    pub line_count: usize,
    pub record_count: usize,
    /// `None` when there was nothing to save.
    pub output: Option<PathBuf>,
}

impl TableSummary {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

#[derive(Debug)]
pub struct ExtractionResult {
    pub output_dir: PathBuf,
    pub tables: Vec<TableSummary>,
}

impl ExtractionResult {
    pub fn has_empty_tables(&self) -> bool {
        self.tables.iter().any(TableSummary::is_empty)
    }
}

#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    /// `None` when no vaccine was recognised.
    pub output: Option<PathBuf>,
    pub row_count: usize,
    pub record_count: usize,
}

#[derive(Debug)]
pub struct BuildResult {
    pub nip_definition: PathBuf,
    pub iap_definition: PathBuf,
    pub nip_entries: usize,
    pub iap_vaccines: usize,
    pub categories: Vec<String>,
}

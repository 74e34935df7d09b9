//! Sources of raw OCR lines.
//!
//! Recognition itself is external. An [`OcrEngine`] turns one page image (or
//! an already recognised text dump) into trimmed, non-blank lines.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{IngestError, Result};

pub trait OcrEngine {
    fn extract_lines(&self, source: &Path) -> Result<Vec<String>>;
}

/// Split recognised text into trimmed lines, dropping blank ones.
pub fn clean_ocr_output(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads text that was recognised elsewhere, one OCR line per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileSource;

impl OcrEngine for TextFileSource {
    fn extract_lines(&self, source: &Path) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(source).map_err(|e| IngestError::io(source, e))?;
        Ok(clean_ocr_output(&text))
    }
}

/// Runs the `tesseract` executable in table-friendly mode.
#[derive(Debug, Clone)]
pub struct TesseractCommand {
    program: PathBuf,
    lang: String,
}

impl Default for TesseractCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
            lang: "eng".to_string(),
        }
    }
}

impl TesseractCommand {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_program(mut self, program: PathBuf) -> Self {
        self.program = program;
        self
    }

    #[must_use]
    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }
}

impl OcrEngine for TesseractCommand {
    fn extract_lines(&self, source: &Path) -> Result<Vec<String>> {
        // LSTM engine, single uniform block, keep column gaps.
        let output = Command::new(&self.program)
            .arg(source)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("6")
            .arg("-c")
            .arg("preserve_interword_spaces=1")
            .output()
            .map_err(|e| IngestError::Ocr {
                path: source.to_path_buf(),
                message: format!("failed to invoke {}: {e}", self.program.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IngestError::Ocr {
                path: source.to_path_buf(),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines = clean_ocr_output(&stdout);
        debug!(
            image = %source.display(),
            line_count = lines.len(),
            "tesseract finished"
        );
        Ok(lines)
    }
}

//! Vaccine name recognition.
//!
//! The vocabulary is an ordered list of canonical names, each with a set of
//! case-insensitive regex patterns. Matching walks the list in declaration
//! order and returns the first canonical name with any matching pattern, so
//! text that hits several entries (e.g. "Tetanus" is both a Pentavalent
//! component and part of Td) resolves to the earliest one.
//!
//! ## TOML form
//!
//! ```toml
//! [[vaccine]]
//! name = "Hepatitis B"
//! patterns = ["Hepatitis B", "Hep B"]
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Built-in vocabulary, in match priority order.
pub const DEFAULT_VOCABULARY: &[(&str, &[&str])] = &[
    ("Hepatitis B", &["Hepatitis B", "Hep B"]),
    (
        "Pentavalent",
        &["Pentavalent", "Diphtheria", "Pertussis", "Tetanus", "Hib"],
    ),
    ("IPV", &["IPV", "Polio"]),
    ("Pneumococcal", &["Pneumococcal", "PCV"]),
    ("Td", &["Td", "Tetanus"]),
    ("Measles", &["Measles"]),
    ("Rubella", &["Rubella"]),
    ("Japanese Encephalitis", &["Japanese Encephalitis", "JE"]),
];

static DEFAULT: LazyLock<VaccineVocabulary> = LazyLock::new(|| {
    VaccineVocabulary::new(
        DEFAULT_VOCABULARY
            .iter()
            .map(|(name, patterns)| (*name, patterns.iter().copied())),
    )
    .expect("Invalid built-in vaccine vocabulary")
});

#[derive(Debug, Clone)]
struct VocabularyEntry {
    name: String,
    patterns: Vec<Regex>,
}

impl VocabularyEntry {
    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

#[derive(Debug, Clone)]
pub struct VaccineVocabulary {
    entries: Vec<VocabularyEntry>,
}

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(rename = "vaccine", default)]
    vaccines: Vec<VocabularyFileEntry>,
}

#[derive(Debug, Deserialize)]
struct VocabularyFileEntry {
    name: String,
    #[serde(default)]
    patterns: Vec<String>,
}

impl VaccineVocabulary {
    /// Compile an ordered `(canonical name, patterns)` list.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Pattern`] for the first pattern that is not a
    /// valid regex.
    pub fn new<I, N, P, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for (name, patterns) in entries {
            let name = name.into();
            let mut regexes = Vec::new();
            for pattern in patterns {
                let pattern = pattern.as_ref();
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| IngestError::Pattern {
                        vaccine: name.clone(),
                        pattern: pattern.to_string(),
                        source,
                    })?;
                regexes.push(regex);
            }
            compiled.push(VocabularyEntry {
                name,
                patterns: regexes,
            });
        }
        Ok(Self { entries: compiled })
    }

    /// Parse the TOML form; `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let file: VocabularyFile =
            toml::from_str(text).map_err(|source| IngestError::Vocabulary {
                origin: origin.to_string(),
                source,
            })?;
        Self::new(
            file.vaccines
                .into_iter()
                .map(|entry| (entry.name, entry.patterns)),
        )
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
        let vocabulary = Self::from_toml_str(&text, &path.display().to_string())?;
        debug!(
            path = %path.display(),
            vaccine_count = vocabulary.len(),
            "loaded vaccine vocabulary"
        );
        Ok(vocabulary)
    }

    /// Canonical name of the first entry with a pattern found in `text`.
    pub fn match_name(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.matches(text))
            .map(|entry| entry.name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VaccineVocabulary {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

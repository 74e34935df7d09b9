use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to process CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid pattern '{pattern}' for vaccine '{vaccine}': {source}")]
    Pattern {
        vaccine: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse vocabulary {origin}: {source}")]
    Vocabulary {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("OCR failed for {path}: {message}")]
    Ocr { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

pub mod clean;
pub mod csv_table;
pub mod error;
pub mod iap_matrix;
pub mod nip_table;
pub mod normalize;
pub mod ocr;
pub mod vocabulary;

pub use clean::{clean_nip_table, extract_age_phrases};
pub use csv_table::{
    IAP_TABLE_FILE, NIP_TABLE_FILE, RawTable, read_iap_table, read_nip_table, read_raw_table,
    write_iap_table, write_nip_table,
};
pub use error::{IngestError, Result};
pub use iap_matrix::{MatrixAction, MatrixState, MatrixTableParser, parse_iap_matrix};
pub use nip_table::{LinearAction, LinearState, LinearTableParser, parse_nip_table};
pub use normalize::{capitalize_sides, is_separator_line, normalize_text};
pub use ocr::{OcrEngine, TesseractCommand, TextFileSource, clean_ocr_output};
pub use vocabulary::{DEFAULT_VOCABULARY, VaccineVocabulary};

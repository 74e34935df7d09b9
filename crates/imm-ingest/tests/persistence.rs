use std::fs;

use tempfile::tempdir;

use imm_ingest::{
    IAP_TABLE_FILE, IngestError, NIP_TABLE_FILE, OcrEngine, TextFileSource, VaccineVocabulary,
    clean_nip_table, parse_nip_table, read_iap_table, read_nip_table, read_raw_table,
    write_iap_table, write_nip_table,
};
use imm_model::{MatrixEntry, VaccineRecord};

#[test]
fn nip_table_is_normalized_on_save() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("out").join(NIP_TABLE_FILE);
    let records = vec![VaccineRecord::new(
        "BCG*",
        "At  birth",
        "0.1 ml;",
        "Intra-dermal",
        "Left | upper arm",
    )];

    assert!(write_nip_table(&path, &records).expect("write"));
    let loaded = read_nip_table(&path).expect("read");
    assert_eq!(
        loaded,
        vec![VaccineRecord::new("BCG", "At birth", "01 ml", "Intra-dermal", "Left upper arm")]
    );

    let header = fs::read_to_string(&path).expect("read text");
    assert!(header.starts_with("Vaccine,When to give,Dose,Route,Site"));
}

#[test]
fn iap_table_uses_long_format() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(IAP_TABLE_FILE);
    let entries = vec![
        MatrixEntry::new("Polio", "birth", "OPV0"),
        MatrixEntry::new("Polio", "6w", "OPV1"),
    ];
    assert!(write_iap_table(&path, &entries).expect("write"));
    assert_eq!(read_iap_table(&path).expect("read"), entries);

    let text = fs::read_to_string(&path).expect("read text");
    assert_eq!(text.lines().next(), Some("Vaccine,Age,Dose"));
}

#[test]
fn saving_nothing_writes_no_file() {
    let dir = tempdir().expect("tempdir");
    let nip = dir.path().join(NIP_TABLE_FILE);
    let iap = dir.path().join(IAP_TABLE_FILE);
    assert!(!write_nip_table(&nip, &[]).expect("write"));
    assert!(!write_iap_table(&iap, &[]).expect("write"));
    assert!(!nip.exists());
    assert!(!iap.exists());
}

#[test]
fn missing_table_is_a_csv_error() {
    let dir = tempdir().expect("tempdir");
    let result = read_nip_table(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(IngestError::Csv { .. })));
}

#[test]
fn raw_table_skips_wide_rows_and_pads_short_ones() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("messy.csv");
    fs::write(
        &path,
        "Vaccine,When to give,Dose,Route,Site\n\
         Measles,9 months,0.5 ml,Sub-cutaneous,right upper arm\n\
         ,or 12 months\n\
         a,b,c,d,e,f\n",
    )
    .expect("write");

    let table = read_raw_table(&path).expect("read");
    assert_eq!(table.headers.len(), 5);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["", "or 12 months", "", "", ""]);
    assert_eq!(table.column_index("when to give"), Some(1));

    let cleaned = clean_nip_table(&table, &VaccineVocabulary::default());
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].when_to_give, "12 months, 9 months");
    assert_eq!(cleaned[0].site, "Right upper arm");
}

#[test]
fn text_source_feeds_the_linear_parser() {
    let dir = tempdir().expect("tempdir");
    let page = dir.path().join("nip.txt");
    fs::write(
        &page,
        "\n  Vaccine    When to give    Dose    Route    Site\n\
         OPV    At birth    2 drops    Oral\n\n",
    )
    .expect("write");

    let lines = TextFileSource.extract_lines(&page).expect("lines");
    assert_eq!(lines.len(), 2);
    let records = parse_nip_table(&lines);
    assert_eq!(records, vec![VaccineRecord::new("OPV", "At birth", "2 drops", "Oral", "")]);
}

#[test]
fn vocabulary_file_is_loaded_in_order() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vocabulary.toml");
    fs::write(
        &path,
        "[[vaccine]]\nname = \"Rotavirus\"\npatterns = [\"Rota\", \"RV\"]\n",
    )
    .expect("write");
    let vocabulary = VaccineVocabulary::load(&path).expect("load");
    assert_eq!(vocabulary.len(), 1);
    assert_eq!(vocabulary.match_name("rota virus"), Some("Rotavirus"));

    fs::write(&path, "[[vaccine]]\nname = 3\n").expect("write");
    assert!(matches!(
        VaccineVocabulary::load(&path),
        Err(IngestError::Vocabulary { .. })
    ));
}

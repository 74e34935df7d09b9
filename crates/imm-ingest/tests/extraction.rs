//! End-to-end extraction over OCR-shaped text.

use imm_ingest::{MatrixTableParser, parse_iap_matrix, parse_nip_table};
use imm_model::{MatrixEntry, VaccineRecord};

const NIP_PAGE: &[&str] = &[
    "National Immunization Schedule (NIS) for Infants, Children and Pregnant Women",
    "+---------------------------------------------------------------+",
    "Vaccine        When to give        Dose        Route        Site",
    "|--------------|-------------------|-----------|------------|",
    "BCG            At birth            0.1ml       Intra-dermal Left Upper Arm",
    "Hepatitis B    At birth            0.5 ml      Intra-muscular  Antero-lateral mid-thigh",
    "Pentavalent    6 weeks             0.5 ml      Intra-muscular  Antero-lateral mid-thigh",
    "1, 2 & 3",
    "OPV            6 weeks             2 drops     Oral",
];

#[test]
fn nip_page_yields_records_in_document_order() {
    let records = parse_nip_table(NIP_PAGE);
    let names: Vec<&str> = records.iter().map(|r| r.vaccine.as_str()).collect();
    assert_eq!(
        names,
        vec!["BCG", "Hepatitis B", "Pentavalent 1, 2 & 3", "OPV"]
    );
    assert_eq!(
        records[0],
        VaccineRecord::new("BCG", "At birth", "0.1ml", "Intra-dermal", "Left Upper Arm")
    );
    assert_eq!(records[3].site, "");
}

#[test]
fn continuation_line_never_creates_a_record() {
    let records = parse_nip_table(&[
        "Measles  9 completed months  0.5 ml  Sub-cutaneous  Right upper arm",
        "(MR) 1st dose",
    ]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vaccine, "Measles (MR) 1st dose");
}

#[test]
fn leading_continuation_is_dropped() {
    let records = parse_nip_table(&[
        "wrapped text without a row",
        "Td  10 years  0.5 ml  Intra-muscular  Upper Arm",
    ]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vaccine, "Td");
}

#[test]
fn matrix_codes_pair_with_header_columns_by_scan_order() {
    let lines = [
        "IAP Immunization Timetable",
        "Vaccine   Birth   6w   10w",
        "---------------------------",
        "Polio   BCG1   OPV1   OPV2",
    ];
    let entries = parse_iap_matrix(&lines, None);
    assert_eq!(
        entries,
        vec![
            MatrixEntry::new("Polio", "birth", "BCG1"),
            MatrixEntry::new("Polio", "6w", "OPV1"),
            MatrixEntry::new("Polio", "10w", "OPV2"),
        ]
    );
}

#[test]
fn matrix_lines_before_header_are_ignored() {
    let lines = [
        "Hepatitis B  HB1  HB2",
        "Vaccine  Birth  6w  10w  14w",
        "Hepatitis B  HB1  HB2  HB3",
        "BCG  BCG1",
        "Rotavirus  RV1  RV2  RV3  RV4  RV5",
    ];
    let entries = parse_iap_matrix(&lines, None);
    let hep_b: Vec<&str> = entries
        .iter()
        .filter(|e| e.vaccine == "Hepatitis B")
        .map(|e| e.age_token.as_str())
        .collect();
    assert_eq!(hep_b, vec!["birth", "6w", "10w"]);
    // No name before the first code.
    assert!(entries.iter().all(|e| e.vaccine != "BCG"));
    // Codes beyond the last column are dropped.
    let rota = entries.iter().filter(|e| e.vaccine == "Rotavirus").count();
    assert_eq!(rota, 4);
}

#[test]
fn matrix_without_header_is_empty() {
    let mut parser = MatrixTableParser::new();
    parser.push_line("Polio  OPV1  OPV2");
    assert!(parser.finish().is_empty());
}

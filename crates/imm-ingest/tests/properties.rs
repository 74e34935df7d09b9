use proptest::prelude::*;

use imm_ingest::{LinearTableParser, normalize_text, parse_iap_matrix};

proptest! {
    #[test]
    fn normalize_text_is_idempotent(raw in ".{0,64}") {
        let once = normalize_text(&raw);
        prop_assert_eq!(normalize_text(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn short_lines_never_add_records(
        tail in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,2}", 0..6),
    ) {
        let mut parser = LinearTableParser::new();
        parser.push_line("BCG  At birth  0.1 ml  Intra-dermal  Left upper arm");
        for line in &tail {
            parser.push_line(line);
        }
        let records = parser.finish();
        prop_assert_eq!(records.len(), 1);
        let expected: Vec<&str> = std::iter::once("BCG")
            .chain(tail.iter().map(String::as_str))
            .collect();
        prop_assert_eq!(&records[0].vaccine, &expected.join(" "));
    }

    #[test]
    fn matrix_never_exceeds_header_width(codes in 0usize..8) {
        let body: Vec<String> = (0..codes).map(|i| format!("OPV{i}")).collect();
        let lines = vec![
            "Vaccine  birth  6w  10w".to_string(),
            format!("Polio  {}", body.join("  ")),
        ];
        let entries = parse_iap_matrix(&lines, None);
        prop_assert_eq!(entries.len(), codes.min(3));
    }
}

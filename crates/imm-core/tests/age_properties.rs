use proptest::prelude::*;

use imm_core::normalize_age;
use imm_model::{AgeDialect, DayCount};

fn nip(expr: &str) -> DayCount {
    normalize_age(expr, AgeDialect::Nip)
}

#[test]
fn weeks_before_years() {
    assert!(nip("2 weeks") < nip("3 weeks"));
    assert!(nip("3 weeks") < nip("1 year"));
    assert!(nip("1 year") < DayCount::Never);
}

proptest! {
    #[test]
    fn nip_is_monotonic_within_a_unit(
        a in 0u32..10_000,
        b in 0u32..10_000,
        unit in prop::sample::select(vec!["days", "weeks", "months", "years"]),
    ) {
        let left = nip(&format!("{a} {unit}"));
        let right = nip(&format!("{b} {unit}"));
        prop_assert_eq!(a.cmp(&b), left.cmp(&right));
    }

    #[test]
    fn iap_matches_nip_for_the_same_quantity(
        n in 0u32..1_000,
        (suffix, word) in prop::sample::select(vec![("w", "weeks"), ("m", "months"), ("y", "years")]),
    ) {
        prop_assert_eq!(
            normalize_age(&format!("{n}{suffix}"), AgeDialect::Iap),
            nip(&format!("{n} {word}"))
        );
    }

    #[test]
    fn never_panics(expr in ".{0,32}") {
        let _ = normalize_age(&expr, AgeDialect::Nip);
        let _ = normalize_age(&expr, AgeDialect::Iap);
    }
}

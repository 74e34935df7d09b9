//! Age expressions to day counts.
//!
//! # NIP dialect
//!
//! Free text from the national table, checked in this order:
//!
//! 1. Specials: `at birth` (or a bare `birth`) is day 0, `annually from 6m`
//!    is day 180, `post-exposure` is never.
//! 2. `within ... 24 hours` is day 1, `within ... 15 days` is day 15.
//! 3. The first run of digits, scaled by the first unit word present among
//!    `week` (7), `month` (30), `year` (365), `day` (1). No digits or no unit
//!    means never.
//!
//! # IAP dialect
//!
//! Compact tokens: digits followed by `w`, `m` or `y`. The same specials
//! apply, except that a bare `birth` column token is not a day and means
//! never. Any other suffix means never.
//!
//! Matching is case-insensitive on the trimmed expression.

use std::sync::LazyLock;

use regex::Regex;

use imm_model::{AgeDialect, DAYS_PER_MONTH, DAYS_PER_WEEK, DAYS_PER_YEAR, DayCount};

static DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit run regex"));

/// Day of the first yearly dose.
pub const ANNUAL_START_DAYS: u32 = 6 * DAYS_PER_MONTH;

const NIP_UNITS: &[(&str, u32)] = &[
    ("week", DAYS_PER_WEEK),
    ("month", DAYS_PER_MONTH),
    ("year", DAYS_PER_YEAR),
    ("day", 1),
];

fn special(expr: &str) -> Option<DayCount> {
    match expr {
        "" => Some(DayCount::Never),
        "at birth" => Some(DayCount::BIRTH),
        "annually from 6m" => Some(DayCount::Finite(ANNUAL_START_DAYS)),
        "post-exposure" => Some(DayCount::Never),
        _ => None,
    }
}

fn scale(value: u32, factor: u32) -> DayCount {
    value
        .checked_mul(factor)
        .map_or(DayCount::Never, DayCount::Finite)
}

fn normalize_nip(expr: &str) -> DayCount {
    if expr == "birth" {
        return DayCount::BIRTH;
    }
    if expr.contains("within") {
        if expr.contains("24 hours") {
            return DayCount::Finite(1);
        }
        if expr.contains("15 days") {
            return DayCount::Finite(15);
        }
    }
    let Some(value) = DIGIT_RUN_REGEX
        .find(expr)
        .and_then(|m| m.as_str().parse::<u32>().ok())
    else {
        return DayCount::Never;
    };
    NIP_UNITS
        .iter()
        .find(|(unit, _)| expr.contains(unit))
        .map_or(DayCount::Never, |(_, factor)| scale(value, *factor))
}

fn normalize_iap(expr: &str) -> DayCount {
    let Some(suffix) = expr.chars().last() else {
        return DayCount::Never;
    };
    let factor = match suffix {
        'w' => DAYS_PER_WEEK,
        'm' => DAYS_PER_MONTH,
        'y' => DAYS_PER_YEAR,
        _ => return DayCount::Never,
    };
    let digits = &expr[..expr.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return DayCount::Never;
    }
    digits
        .parse::<u32>()
        .map_or(DayCount::Never, |value| scale(value, factor))
}

/// Position of `expr` on the day timeline.
///
/// Never fails: anything unrecognised is [`DayCount::Never`].
pub fn normalize_age(expr: &str, dialect: AgeDialect) -> DayCount {
    let expr = expr.trim().to_lowercase();
    if let Some(days) = special(&expr) {
        return days;
    }
    match dialect {
        AgeDialect::Nip => normalize_nip(&expr),
        AgeDialect::Iap => normalize_iap(&expr),
    }
}

/// Optional upper bound: absent means no bound.
pub fn normalize_max_age(expr: Option<&str>, dialect: AgeDialect) -> DayCount {
    expr.map_or(DayCount::Never, |expr| normalize_age(expr, dialect))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nip(expr: &str) -> DayCount {
        normalize_age(expr, AgeDialect::Nip)
    }

    fn iap(expr: &str) -> DayCount {
        normalize_age(expr, AgeDialect::Iap)
    }

    #[test]
    fn nip_specials() {
        assert_eq!(nip("At Birth"), DayCount::Finite(0));
        assert_eq!(nip("Birth"), DayCount::Finite(0));
        assert_eq!(nip(" annually from 6m "), DayCount::Finite(180));
        assert_eq!(nip("Post-exposure"), DayCount::Never);
        assert_eq!(nip(""), DayCount::Never);
    }

    #[test]
    fn nip_within_windows() {
        assert_eq!(nip("within 24 hours"), DayCount::Finite(1));
        assert_eq!(nip("Within first 15 days"), DayCount::Finite(15));
        // Without "within" the hours phrase has no unit.
        assert_eq!(nip("24 hours"), DayCount::Never);
    }

    #[test]
    fn nip_units_take_first_digit_run() {
        assert_eq!(nip("6 weeks"), DayCount::Finite(42));
        assert_eq!(nip("9-12 months"), DayCount::Finite(270));
        assert_eq!(nip("16-24 months"), DayCount::Finite(480));
        assert_eq!(nip("10 years"), DayCount::Finite(3650));
        assert_eq!(nip("15 days"), DayCount::Finite(15));
        assert_eq!(nip("as early as possible"), DayCount::Never);
        assert_eq!(nip("5 doses"), DayCount::Never);
    }

    #[test]
    fn nip_unit_order_prefers_week() {
        // "week" is checked before "day".
        assert_eq!(nip("2 weeks and 3 days"), DayCount::Finite(14));
    }

    #[test]
    fn nip_overflow_is_never() {
        assert_eq!(nip("99999999999 years"), DayCount::Never);
        assert_eq!(nip("4000000000 years"), DayCount::Never);
    }

    #[test]
    fn iap_tokens() {
        assert_eq!(iap("6w"), DayCount::Finite(42));
        assert_eq!(iap("9M"), DayCount::Finite(270));
        assert_eq!(iap("4y"), DayCount::Finite(1460));
        assert_eq!(iap("Birth"), DayCount::Never);
        assert_eq!(iap("At birth"), DayCount::Finite(0));
        assert_eq!(iap("Annually from 6m"), DayCount::Finite(180));
        assert_eq!(iap("Post-exposure"), DayCount::Never);
    }

    #[test]
    fn iap_rejects_other_shapes() {
        assert_eq!(iap("10d"), DayCount::Never);
        assert_eq!(iap("w"), DayCount::Never);
        assert_eq!(iap("4-6y"), DayCount::Never);
        assert_eq!(iap("6 weeks"), DayCount::Never);
    }

    #[test]
    fn absent_max_is_unbounded() {
        assert_eq!(normalize_max_age(None, AgeDialect::Nip), DayCount::Never);
        assert_eq!(
            normalize_max_age(Some("1 year"), AgeDialect::Nip),
            DayCount::Finite(365)
        );
    }
}

//! Human-readable IAP age tokens.

use std::collections::BTreeMap;

use imm_model::{ANNUAL_TOKEN, BIRTH_TOKEN, POST_EXPOSURE_TOKEN};

/// Render one IAP token; unknown shapes come back unchanged.
pub fn format_iap_token(token: &str, age_units: &BTreeMap<String, String>) -> String {
    match token {
        BIRTH_TOKEN => return "At birth".to_string(),
        ANNUAL_TOKEN => return "Annually (starting at 6 months)".to_string(),
        POST_EXPOSURE_TOKEN => return "Post-exposure only".to_string(),
        _ => {}
    }
    let Some(suffix) = token.chars().last() else {
        return token.to_string();
    };
    let (value, unit_key) = token.split_at(token.len() - suffix.len_utf8());
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return token.to_string();
    }
    match age_units.get(unit_key) {
        Some(unit) => format!("{value} {unit}"),
        None => token.to_string(),
    }
}

/// Render a whole schedule, joined with ", ".
pub fn format_iap_schedule(tokens: &[String], age_units: &BTreeMap<String, String>) -> String {
    tokens
        .iter()
        .map(|token| format_iap_token(token, age_units))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use imm_model::default_age_units;

    use super::*;

    #[test]
    fn renders_unit_tokens() {
        let units = default_age_units();
        assert_eq!(format_iap_token("10w", &units), "10 weeks");
        assert_eq!(format_iap_token("9m", &units), "9 months");
        assert_eq!(format_iap_token("4y", &units), "4 years");
    }

    #[test]
    fn renders_fixed_phrases() {
        let units = default_age_units();
        assert_eq!(format_iap_token("Birth", &units), "At birth");
        assert_eq!(
            format_iap_token("Annually from 6m", &units),
            "Annually (starting at 6 months)"
        );
        assert_eq!(
            format_iap_token("Post-exposure", &units),
            "Post-exposure only"
        );
    }

    #[test]
    fn unknown_tokens_fall_back_verbatim() {
        let units = default_age_units();
        assert_eq!(format_iap_token("10d", &units), "10d");
        assert_eq!(format_iap_token("", &units), "");
        assert_eq!(format_iap_token("m", &units), "m");
        assert_eq!(format_iap_token("4-6y", &units), "4-6y");
        assert_eq!(format_iap_token("Catch-up", &units), "Catch-up");
    }

    #[test]
    fn joins_schedule() {
        let tokens = vec!["Birth".to_string(), "6w".to_string()];
        assert_eq!(
            format_iap_schedule(&tokens, &default_age_units()),
            "At birth, 6 weeks"
        );
    }
}

//! OCR text clean-up.
//!
//! [`normalize_text`] keeps ASCII letters and digits, whitespace, and the
//! punctuation `- / ( )`, collapses whitespace runs to one space and trims.
//! It is idempotent. [`capitalize_sides`] is a separate pass that title-cases
//! the standalone words "left" and "right" in anatomical site notation.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SIDE_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(left|right)\b").expect("Invalid side-word regex"));

const SEPARATOR_CHARS: &[char] = &['|', '+', '=', '_', '-'];

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch.is_whitespace() || matches!(ch, '-' | '/' | '(' | ')')
}

/// Strip junk characters, collapse whitespace and trim.
pub fn normalize_text(raw: &str) -> String {
    let kept: String = raw.chars().filter(|ch| is_allowed(*ch)).collect();
    let mut normalized = String::with_capacity(kept.len());
    for word in kept.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

/// Title-case standalone "left"/"right", in any letter case.
pub fn capitalize_sides(text: &str) -> String {
    SIDE_WORD_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            if caps[1].eq_ignore_ascii_case("left") {
                "Left"
            } else {
                "Right"
            }
        })
        .into_owned()
}

/// True for table rules drawn with `| + = _ -` only.
pub fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| SEPARATOR_CHARS.contains(&ch))
}

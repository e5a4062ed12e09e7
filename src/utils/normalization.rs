//! Text normalization shared by headword matching, letter selection and extraction.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics and expand the ligatures the dictionary uses (`é → e`, `œ → oe`).
pub fn fold_accents(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.nfd() {
        match c {
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            c if is_combining_mark(c) => {}
            c => out.push(c),
        }
    }
    out
}

/// Key used to compare headwords: accent-folded, uppercased, trimmed.
pub fn headword_key(input: &str) -> String {
    fold_accents(input.trim()).to_uppercase()
}

fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[ \t\r]*\n\s*").expect("valid line break pattern"))
}

/// Replace markup line breaks (and the indentation around them) with a single space, then trim.
pub fn collapse_breaks(input: &str) -> String {
    line_break_pattern().replace_all(input, " ").trim().to_string()
}

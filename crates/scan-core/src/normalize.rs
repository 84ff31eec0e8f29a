//! Text normalization for label matching
//!
//! Canonicalizes raw OCR output into the form all matching runs against:
//! - Unicode NFKC normalization
//! - Lowercase conversion
//! - German umlaut/eszett folding (ae/oe/ue/ss)
//! - Dash variant folding to ASCII hyphen
//! - Separator collapsing to single spaces
//! - Narrow whole-token OCR confusion fixes

use unicode_normalization::UnicodeNormalization;

/// Separator punctuation collapsed to a space alongside whitespace.
const SEPARATORS: &[char] = &[',', ';', ':', '(', ')', '/', '\\'];

/// Dash variants folded to an ASCII hyphen: hyphen, non-breaking hyphen,
/// figure dash, en dash, em dash.
const DASHES: &[char] = &['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}'];

/// Normalize raw label text for matching.
///
/// Idempotent: running the output through `normalize` again is a no-op, so
/// lexicon entries stored in normalized form never drift from scanned text.
///
/// # Examples
///
/// ```
/// use scan_core::normalize::normalize;
///
/// assert_eq!(normalize("Zutaten: GELATINE, Zucker"), "zutaten gelatine zucker");
/// assert_eq!(normalize("enthält Süßstoff"), "enthaelt suessstoff");
/// assert_eq!(normalize("L–Cystein"), "l-cystein");
/// ```
pub fn normalize(s: &str) -> String {
    // NFKC can surface uppercase compatibility forms, so lowercase runs on
    // both sides of the fold to keep the whole pass idempotent.
    let lowered = s.to_lowercase();

    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.nfkc().flat_map(char::to_lowercase) {
        match c {
            'ä' => folded.push_str("ae"),
            'ö' => folded.push_str("oe"),
            'ü' => folded.push_str("ue"),
            'ß' => folded.push_str("ss"),
            c if DASHES.contains(&c) => folded.push('-'),
            c if SEPARATORS.contains(&c) => folded.push(' '),
            c => folded.push(c),
        }
    }

    // Whole-token OCR confusion fixes, then whitespace collapse + trim.
    let tokens: Vec<&str> = folded.split_whitespace().map(fix_ocr_token).collect();
    tokens.join(" ")
}

/// Fix the two known OCR single-character confusions.
///
/// Applies to whole tokens only, never substrings, so unrelated words are
/// left untouched.
fn fix_ocr_token(token: &str) -> &str {
    match token {
        "o" => "0",
        "1" => "l",
        _ => token,
    }
}

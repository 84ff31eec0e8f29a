//! Lexicon matching over normalized label text
//!
//! Two independent passes over the same normalized text:
//!
//! 1. Full-text substring containment for every blacklist and greylist
//!    entry. Deliberately not word-boundary-based: entries may be multi-word
//!    phrases ("mono- und diglyceride") or embedded fragments ("l-cystein").
//! 2. Additive-code extraction: every word-bounded `e` + 3-4 digit run is
//!    collected, then resolved against the code map. Explicit character-class
//!    scanning, no regex engine, so the word-boundary behavior is identical
//!    on every platform.
//!
//! Resolved codes join the word-tier hit sets; unresolved codes surface only
//! in `code_hits`, never as unknown tokens.

use std::collections::BTreeSet;

use crate::lexicon::{CodeTag, Lexicon};

/// Raw matcher output, one set per evidence channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub blacklist_hits: BTreeSet<String>,
    pub greylist_hits: BTreeSet<String>,
    /// Every additive code found in the text, resolved or not.
    pub code_hits: BTreeSet<String>,
}

/// Match normalized text against a lexicon.
pub fn match_text(normalized: &str, lexicon: &Lexicon) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for entry in &lexicon.blacklist {
        if normalized.contains(entry.as_str()) {
            outcome.blacklist_hits.insert(entry.clone());
        }
    }
    for entry in &lexicon.greylist {
        if normalized.contains(entry.as_str()) {
            outcome.greylist_hits.insert(entry.clone());
        }
    }

    outcome.code_hits = extract_codes(normalized);
    for code in &outcome.code_hits {
        match lexicon.code_map.get(code) {
            Some(CodeTag::NotVegan) => {
                outcome.blacklist_hits.insert(code.clone());
            }
            Some(CodeTag::Maybe) => {
                outcome.greylist_hits.insert(code.clone());
            }
            // Unresolved: informational only, stays in code_hits
            None => {}
        }
    }

    outcome
}

/// Extract all word-bounded additive codes (`e` + 3-4 digits) from text.
///
/// A hit must be bounded on both sides by a non-alphanumeric character or a
/// string edge: `e120` and `(e120)` match, `e12000` and `me120` do not.
pub fn extract_codes(text: &str) -> BTreeSet<String> {
    let mut codes = BTreeSet::new();
    let chars: Vec<char> = text.chars().collect();

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == 'e' && (i == 0 || !chars[i - 1].is_alphanumeric()) {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let digits = j - i - 1;
            let bounded = j == chars.len() || !chars[j].is_alphanumeric();
            if (3..=4).contains(&digits) && bounded {
                codes.insert(chars[i..j].iter().collect());
            }
            // Digit runs cannot start another code
            i = j.max(i + 1);
        } else {
            i += 1;
        }
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        let mut lex = Lexicon::default();
        lex.blacklist.insert("gelatine".to_string());
        lex.blacklist.insert("l-cystein".to_string());
        lex.greylist.insert("mono- und diglyceride".to_string());
        lex.code_map.insert("e120".to_string(), CodeTag::NotVegan);
        lex.code_map.insert("e471".to_string(), CodeTag::Maybe);
        lex
    }

    #[test]
    fn test_substring_blacklist_hit() {
        let outcome = match_text("zutaten gelatine zucker", &lexicon());
        assert!(outcome.blacklist_hits.contains("gelatine"));
        assert!(outcome.greylist_hits.is_empty());
    }

    #[test]
    fn test_substring_matches_inside_words() {
        // Substring containment by design: "schweinegelatine" still hits
        let outcome = match_text("schweinegelatine", &lexicon());
        assert!(outcome.blacklist_hits.contains("gelatine"));
    }

    #[test]
    fn test_multiword_phrase_hit() {
        let outcome = match_text("emulgator mono- und diglyceride von speisefettsaeuren", &lexicon());
        assert!(outcome.greylist_hits.contains("mono- und diglyceride"));
    }

    #[test]
    fn test_extract_codes_word_bounded() {
        assert!(extract_codes("e120").contains("e120"));
        assert!(extract_codes("farbstoff e120 zucker").contains("e120"));
        assert!(extract_codes("(e120)").contains("e120"));
        // 5 digits is not a code
        assert!(extract_codes("e12000").is_empty());
        // 2 digits is not a code
        assert!(extract_codes("e12").is_empty());
        // No left boundary
        assert!(extract_codes("me120").is_empty());
        // No right boundary (letter follows the digits)
        assert!(extract_codes("e120a").is_empty());
    }

    #[test]
    fn test_extract_codes_four_digits() {
        let codes = extract_codes("enthaelt e1105 und e120");
        assert!(codes.contains("e1105"));
        assert!(codes.contains("e120"));
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_extract_codes_dedup() {
        let codes = extract_codes("e120 e120 e120");
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_code_resolution_into_hit_sets() {
        let outcome = match_text("enthaelt e120 und e471", &lexicon());
        assert!(outcome.blacklist_hits.contains("e120"));
        assert!(outcome.greylist_hits.contains("e471"));
        assert!(outcome.code_hits.contains("e120"));
        assert!(outcome.code_hits.contains("e471"));
    }

    #[test]
    fn test_unresolved_code_stays_informational() {
        let outcome = match_text("enthaelt e999", &lexicon());
        assert!(outcome.code_hits.contains("e999"));
        assert!(outcome.blacklist_hits.is_empty());
        assert!(outcome.greylist_hits.is_empty());
    }

    #[test]
    fn test_empty_text_and_empty_lexicon() {
        let outcome = match_text("", &lexicon());
        assert_eq!(outcome, MatchOutcome::default());

        let outcome = match_text("zutaten gelatine e120", &Lexicon::default());
        assert!(outcome.blacklist_hits.is_empty());
        assert!(outcome.code_hits.contains("e120"));
    }
}

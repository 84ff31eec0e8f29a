//! Unknown-term detection
//!
//! Flags word-like tokens of the normalized text that no lexicon tier covers
//! and that are not generic label vocabulary. These are the "check this
//! yourself" terms surfaced next to the verdict.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::lexicon::{is_normalized_code, Lexicon};

/// Display cap for unknown tokens.
pub const MAX_UNKNOWN_TOKENS: usize = 30;

/// Generic German ingredient-label vocabulary with no vegan-safety signal.
///
/// Structural label language ("zutaten", "enthaelt", "spuren"), generic
/// ingredient-class words ("aroma", "emulgator", "mehl"), and always-vegan
/// staples ("zucker", "salz", "wasser"). All entries are pre-normalized;
/// umlaut spellings never occur in normalized text.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "zutaten",
        "spuren",
        "kann",
        "enthaelt",
        "hergestellt",
        "mit",
        "und",
        "oder",
        "aus",
        "von",
        "frei",
        "ohne",
        "natuerliches",
        "aroma",
        "aromen",
        "farbstoff",
        "emulgator",
        "stabilisator",
        "saeureregulator",
        "suesstoff",
        "suessstoff",
        "gewuerz",
        "gewuerze",
        "pflanzlich",
        "pflanzliche",
        "oel",
        "fett",
        "fette",
        "protein",
        "proteinpulver",
        "extrakt",
        "pulver",
        "konzentrat",
        "mehl",
        "staerke",
        "zucker",
        "salz",
        "wasser",
    ]
    .into_iter()
    .collect()
});

/// Detect tokens not covered by the lexicon or the stopword set.
///
/// Deduplicated in first-occurrence order, capped at
/// [`MAX_UNKNOWN_TOKENS`]. Tokens that scan as additive codes are excluded
/// here even when unresolved; those belong to the code channel of the
/// matcher.
pub fn detect_unknown(normalized: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unknown = Vec::new();

    for token in normalized
        .split(is_token_separator)
        .filter(|t| !t.is_empty())
    {
        if unknown.len() == MAX_UNKNOWN_TOKENS {
            break;
        }
        if !is_candidate(token) {
            continue;
        }
        if lexicon.contains(token) || is_normalized_code(token) || STOPWORDS.contains(token) {
            continue;
        }
        if seen.insert(token) {
            unknown.push(token.to_string());
        }
    }

    unknown
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | ':' | '(' | ')')
}

/// Candidate filter: length >= 3, entirely `[a-z0-9-]`, letter-initial.
fn is_candidate(token: &str) -> bool {
    token.len() >= 3
        && token.starts_with(|c: char| c.is_ascii_lowercase())
        && token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

//! Classification pipeline
//!
//! Wires the normalizer, matcher, unknown-term detector, and verdict
//! aggregator into one synchronous, side-effect-free call. Safe to invoke
//! concurrently: the only shared value is the lexicon, taken by shared
//! reference and read-only for the duration of a scan.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::matcher::match_text;
use crate::normalize::normalize;
use crate::unknown::detect_unknown;
use crate::verdict::{aggregate, Verdict};

/// Immutable result of one classification call.
///
/// Field names are camelCase on the wire; hit lists are sorted, unknown
/// tokens keep first-occurrence order and are capped at 30.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub verdict: Verdict,
    pub blacklist_hits: Vec<String>,
    pub greylist_hits: Vec<String>,
    pub code_hits: Vec<String>,
    pub unknown_tokens: Vec<String>,
}

impl ScanResult {
    /// Fail-safe result when no lexicon is available: "cannot evaluate",
    /// never a false assertion of safety.
    pub fn unevaluated() -> Self {
        Self {
            verdict: Verdict::Unclear,
            blacklist_hits: Vec::new(),
            greylist_hits: Vec::new(),
            code_hits: Vec::new(),
            unknown_tokens: Vec::new(),
        }
    }
}

/// Classify raw OCR text against a lexicon.
///
/// Never fails or panics for any input text; without a lexicon it returns
/// the fail-safe [`ScanResult::unevaluated`].
pub fn classify(raw_text: &str, lexicon: Option<&Lexicon>) -> ScanResult {
    let Some(lexicon) = lexicon else {
        return ScanResult::unevaluated();
    };

    let normalized = normalize(raw_text);
    let outcome = match_text(&normalized, lexicon);
    let unknown_tokens = detect_unknown(&normalized, lexicon);
    let verdict = aggregate(&outcome.blacklist_hits, &outcome.greylist_hits, &unknown_tokens);

    debug!(
        "Classified {} chars: {:?} ({} blacklist, {} greylist, {} codes, {} unknown)",
        raw_text.len(),
        verdict,
        outcome.blacklist_hits.len(),
        outcome.greylist_hits.len(),
        outcome.code_hits.len(),
        unknown_tokens.len()
    );

    ScanResult {
        verdict,
        blacklist_hits: outcome.blacklist_hits.into_iter().collect(),
        greylist_hits: outcome.greylist_hits.into_iter().collect(),
        code_hits: outcome.code_hits.into_iter().collect(),
        unknown_tokens,
    }
}

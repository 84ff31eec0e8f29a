//! Verdict aggregation
//!
//! Folds the three evidence channels into the final three-way verdict.
//! A total precedence order over evidence classes, never a score.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Final vegan-safety classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Vegan,
    NotVegan,
    Unclear,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Vegan => write!(f, "Vegan"),
            Verdict::NotVegan => write!(f, "Not vegan"),
            Verdict::Unclear => write!(f, "Unclear"),
        }
    }
}

/// Aggregate hit sets and unknown tokens into a verdict.
///
/// Precedence, in order:
/// 1. any blacklist hit -> `NotVegan`, overriding everything else
/// 2. any greylist hit or unknown token -> `Unclear`
/// 3. otherwise -> `Vegan`
pub fn aggregate(
    blacklist_hits: &BTreeSet<String>,
    greylist_hits: &BTreeSet<String>,
    unknown_tokens: &[String],
) -> Verdict {
    if !blacklist_hits.is_empty() {
        Verdict::NotVegan
    } else if !greylist_hits.is_empty() || !unknown_tokens.is_empty() {
        Verdict::Unclear
    } else {
        Verdict::Vegan
    }
}

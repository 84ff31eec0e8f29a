//! scan-core: Vegan-safety classification engine
//!
//! This crate contains the pure classification logic with NO network or UI
//! dependencies:
//! - Normalizer for raw OCR text (lowercase, NFKC, umlaut/dash folding,
//!   narrow OCR confusion fixes)
//! - Immutable tiered Lexicon (blacklist, greylist, additive-code map) with
//!   fragment validation and extension merging
//! - Matcher (substring containment + word-bounded additive-code scan)
//! - Unknown-term detector with the generic label stopword set
//! - Verdict aggregation (blacklist > greylist/unknown > vegan)
//! - JSON lexicon loader with boundary validation
//!
//! The pipeline is synchronous and side-effect-free over immutable inputs;
//! OCR, image handling, rendering, and network fetch of lexicon extensions
//! live with the caller.

pub mod config;
pub mod engine;
pub mod lexicon;
pub mod matcher;
pub mod normalize;
pub mod unknown;
pub mod verdict;

// Re-export commonly used types
pub use config::LexiconLoader;
pub use engine::{classify, ScanResult};
pub use lexicon::{CodeTag, FragmentError, Lexicon, LexiconFragment};
pub use matcher::{extract_codes, match_text, MatchOutcome};
pub use normalize::normalize;
pub use unknown::{detect_unknown, MAX_UNKNOWN_TOKENS};
pub use verdict::{aggregate, Verdict};

//! vegan-scan: ingredient-label vegan-safety scanner
//!
//! Application glue over the pure [`scan_core`] engine: a caller-owned scan
//! session that retains the active lexicon and the last scanned text, and a
//! CLI driver (`scan_cli`). OCR and image handling stay outside; this crate
//! consumes raw label text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vegan_scan::ScanSession;
//! use scan_core::LexiconLoader;
//!
//! let lexicon = LexiconLoader::from_env().load().expect("lexicon");
//! let mut session = ScanSession::with_lexicon(lexicon);
//! let result = session.scan("Zutaten: Gelatine, Zucker");
//! println!("{}", result.verdict);
//! ```

pub mod session;

pub use session::ScanSession;

// Re-export the engine surface for callers that only depend on this crate
pub use scan_core::{classify, CodeTag, Lexicon, LexiconLoader, ScanResult, Verdict};

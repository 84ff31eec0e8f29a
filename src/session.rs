//! Caller-owned scan session
//!
//! Holds the active lexicon and the last raw scan so classification can be
//! re-run after a lexicon extension without re-invoking OCR. The engine
//! itself keeps no state; everything lives in this value owned by the
//! caller.

use serde_json::Value;
use tracing::{debug, info};

use scan_core::{classify, Lexicon, ScanResult};

/// State of one scanning workflow: active lexicon, last raw text, last
/// result.
#[derive(Clone, Debug, Default)]
pub struct ScanSession {
    lexicon: Option<Lexicon>,
    last_text: Option<String>,
    last_result: Option<ScanResult>,
}

impl ScanSession {
    /// Session without a lexicon; scans are fail-safe `Unclear` until one is
    /// set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Some(lexicon),
            last_text: None,
            last_result: None,
        }
    }

    pub fn lexicon(&self) -> Option<&Lexicon> {
        self.lexicon.as_ref()
    }

    pub fn last_result(&self) -> Option<&ScanResult> {
        self.last_result.as_ref()
    }

    /// Replace the active lexicon. Does not re-run classification.
    pub fn set_lexicon(&mut self, lexicon: Lexicon) {
        self.lexicon = Some(lexicon);
    }

    /// Classify raw label text with the active lexicon, retaining text and
    /// result for later re-scans.
    pub fn scan(&mut self, raw_text: &str) -> &ScanResult {
        let result = classify(raw_text, self.lexicon.as_ref());
        debug!("Scan verdict: {}", result.verdict);
        self.last_text = Some(raw_text.to_string());
        &*self.last_result.insert(result)
    }

    /// Merge extension fragments into the active lexicon and re-classify the
    /// retained text, if any.
    ///
    /// Malformed fragments are skipped (see [`Lexicon::merge_values`]);
    /// without a prior scan only the lexicon is extended and `None` is
    /// returned.
    pub fn extend(&mut self, fragments: &[Value]) -> Option<&ScanResult> {
        let base = self.lexicon.take().unwrap_or_default();
        let merged = base.merge_values(fragments);
        info!(
            "Extended lexicon: {} blacklist, {} greylist, {} code entries",
            merged.blacklist.len(),
            merged.greylist.len(),
            merged.code_map.len()
        );
        self.lexicon = Some(merged);

        let text = self.last_text.clone()?;
        let result = classify(&text, self.lexicon.as_ref());
        Some(&*self.last_result.insert(result))
    }
}

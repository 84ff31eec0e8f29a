//! Lexicon file loader
//!
//! Reads and validates the ingredient lexicon JSON. Validation enforces the
//! lexicon invariant that every entry is already in normalized form: the
//! engine never re-normalizes lexicon entries at match time, so an
//! unnormalized entry would silently never match.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::lexicon::{is_normalized_code, Lexicon};
use crate::normalize::normalize;

/// Default lexicon path relative to the working directory.
const DEFAULT_LEXICON_PATH: &str = "config/ingredients.json";

/// Environment variable overriding the lexicon path.
const LEXICON_PATH_ENV: &str = "SCAN_LEXICON_PATH";

pub struct LexiconLoader {
    path: PathBuf,
}

impl LexiconLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a loader from the SCAN_LEXICON_PATH env var or the default
    /// `config/ingredients.json`.
    pub fn from_env() -> Self {
        match std::env::var(LEXICON_PATH_ENV) {
            Ok(path) => Self::new(path),
            Err(_) => Self::new(DEFAULT_LEXICON_PATH),
        }
    }

    /// The lexicon file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the lexicon.
    pub fn load(&self) -> Result<Lexicon> {
        info!("Loading ingredient lexicon from {}", self.path.display());

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let lexicon: Lexicon = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        self.validate(&lexicon)?;

        info!(
            "Loaded {} blacklist, {} greylist, {} code entries",
            lexicon.blacklist.len(),
            lexicon.greylist.len(),
            lexicon.code_map.len()
        );

        Ok(lexicon)
    }

    fn validate(&self, lexicon: &Lexicon) -> Result<()> {
        for (tier, entries) in [
            ("blacklist", &lexicon.blacklist),
            ("greylist", &lexicon.greylist),
        ] {
            for entry in entries {
                if entry.is_empty() {
                    return Err(anyhow!("{}: empty entry", tier));
                }
                if normalize(entry) != *entry {
                    return Err(anyhow!(
                        "{} entry '{}' is not in normalized form (expected '{}')",
                        tier,
                        entry,
                        normalize(entry)
                    ));
                }
            }
        }

        for code in lexicon.code_map.keys() {
            if !is_normalized_code(code) {
                return Err(anyhow!(
                    "enumbers key '{}' is not a normalized additive code ('e' + 3-4 digits)",
                    code
                ));
            }
        }

        Ok(())
    }
}

//! Tiered ingredient lexicon and extension merging
//!
//! The lexicon is an immutable value with three tiers: a blacklist of known
//! non-vegan ingredient names, a greylist of ambiguous ones, and a map from
//! additive codes ("e" + 3-4 digits) to a vegan-safety tag. All entries are
//! stored pre-normalized (see [`crate::normalize`]); the engine never
//! re-normalizes lexicon entries at match time.
//!
//! Extensions arrive as already-parsed JSON fragments fetched by the caller.
//! Each fragment is validated into a [`LexiconFragment`] at the boundary;
//! merging unions the word tiers and overlays the code map, base entries
//! first, then fragments in order. Last fragment wins on a code collision,
//! so fragments may deliberately override base code associations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Vegan-safety tag for an additive code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeTag {
    NotVegan,
    Maybe,
}

/// Immutable tiered word/code table.
///
/// Ordered collections keep serialization and hit display deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub blacklist: BTreeSet<String>,
    #[serde(default)]
    pub greylist: BTreeSet<String>,
    /// Additive code -> tag. Codes absent from the map are "unresolved".
    /// Wire name `enumbers` for compatibility with the ingredient data file.
    #[serde(default, rename = "enumbers")]
    pub code_map: BTreeMap<String, CodeTag>,
}

/// Validation error for a lexicon extension fragment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("fragment is not a JSON object")]
    NotAnObject,

    #[error("field '{0}' is not an array of strings")]
    InvalidList(&'static str),

    #[error("field 'enumbers' is not an object of code -> tag")]
    InvalidCodeMap,

    #[error("empty entry in field '{0}'")]
    EmptyEntry(&'static str),

    #[error("malformed additive code key '{0}': expected 'e' + 3-4 digits")]
    MalformedCode(String),

    #[error("unknown tag '{1}' for code '{0}': expected 'not_vegan' or 'maybe'")]
    UnknownTag(String, String),
}

/// One externally supplied partial lexicon, already shape-validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexiconFragment {
    pub blacklist: Vec<String>,
    pub greylist: Vec<String>,
    pub code_map: BTreeMap<String, CodeTag>,
}

impl LexiconFragment {
    /// Validate an already-parsed JSON value into a fragment.
    ///
    /// All three fields are optional; present fields must have the right
    /// shape (string arrays, string-keyed tag object). Anything else is a
    /// typed error so the caller can report which source was bad.
    pub fn from_value(value: &Value) -> Result<Self, FragmentError> {
        let obj = value.as_object().ok_or(FragmentError::NotAnObject)?;
        let mut fragment = LexiconFragment::default();

        if let Some(v) = obj.get("blacklist") {
            fragment.blacklist = string_list(v, "blacklist")?;
        }
        if let Some(v) = obj.get("greylist") {
            fragment.greylist = string_list(v, "greylist")?;
        }
        if let Some(v) = obj.get("enumbers") {
            let map = v.as_object().ok_or(FragmentError::InvalidCodeMap)?;
            for (code, tag) in map {
                if !is_normalized_code(code) {
                    return Err(FragmentError::MalformedCode(code.clone()));
                }
                let tag_str = tag.as_str().ok_or(FragmentError::InvalidCodeMap)?;
                let tag = match tag_str {
                    "not_vegan" => CodeTag::NotVegan,
                    "maybe" => CodeTag::Maybe,
                    other => {
                        return Err(FragmentError::UnknownTag(code.clone(), other.to_string()))
                    }
                };
                fragment.code_map.insert(code.clone(), tag);
            }
        }

        Ok(fragment)
    }
}

fn string_list(value: &Value, field: &'static str) -> Result<Vec<String>, FragmentError> {
    let array = value.as_array().ok_or(FragmentError::InvalidList(field))?;
    let mut out = Vec::with_capacity(array.len());
    for item in array {
        let s = item.as_str().ok_or(FragmentError::InvalidList(field))?;
        if s.is_empty() {
            return Err(FragmentError::EmptyEntry(field));
        }
        out.push(s.to_string());
    }
    Ok(out)
}

/// Check that a string is a normalized additive code: `e` + 3-4 ASCII digits.
pub fn is_normalized_code(s: &str) -> bool {
    let mut chars = s.chars();
    if chars.next() != Some('e') {
        return false;
    }
    let digits = chars.as_str();
    (3..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

impl Lexicon {
    /// Union validated fragments into a new lexicon.
    ///
    /// Blacklist and greylist entries are unioned (deduplicated); code map
    /// entries overlay base-first, fragments in order, last fragment winning
    /// on a key collision. `self` is never mutated.
    pub fn merge(&self, fragments: &[LexiconFragment]) -> Lexicon {
        let mut merged = self.clone();
        for fragment in fragments {
            merged.blacklist.extend(fragment.blacklist.iter().cloned());
            merged.greylist.extend(fragment.greylist.iter().cloned());
            for (code, tag) in &fragment.code_map {
                merged.code_map.insert(code.clone(), *tag);
            }
        }
        merged
    }

    /// Merge already-parsed JSON fragment values, skipping malformed ones.
    ///
    /// A fragment with the wrong shape is logged and skipped; the remaining
    /// fragments still merge. The base lexicon is never partially corrupted:
    /// the result is always a freshly built value.
    pub fn merge_values(&self, values: &[Value]) -> Lexicon {
        let mut valid = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match LexiconFragment::from_value(value) {
                Ok(fragment) => valid.push(fragment),
                Err(e) => warn!("Skipping malformed lexicon fragment #{}: {}", index, e),
            }
        }
        debug!(
            "Merging {} of {} lexicon extension fragments",
            valid.len(),
            values.len()
        );
        self.merge(&valid)
    }

    /// True if a normalized token is covered by any tier of the lexicon.
    pub fn contains(&self, token: &str) -> bool {
        self.blacklist.contains(token)
            || self.greylist.contains(token)
            || self.code_map.contains_key(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Lexicon {
        let mut lex = Lexicon::default();
        lex.blacklist.insert("gelatine".to_string());
        lex.greylist.insert("lecithin".to_string());
        lex.code_map.insert("e120".to_string(), CodeTag::NotVegan);
        lex
    }

    #[test]
    fn test_fragment_from_valid_value() {
        let fragment = LexiconFragment::from_value(&json!({
            "blacklist": ["karmin"],
            "greylist": ["vitamin d3"],
            "enumbers": {"e901": "not_vegan", "e471": "maybe"}
        }))
        .unwrap();
        assert_eq!(fragment.blacklist, vec!["karmin"]);
        assert_eq!(fragment.code_map.get("e471"), Some(&CodeTag::Maybe));
    }

    #[test]
    fn test_fragment_missing_fields_default_empty() {
        let fragment = LexiconFragment::from_value(&json!({"blacklist": ["talg"]})).unwrap();
        assert!(fragment.greylist.is_empty());
        assert!(fragment.code_map.is_empty());
    }

    #[test]
    fn test_fragment_rejects_wrong_shapes() {
        assert_eq!(
            LexiconFragment::from_value(&json!(["not", "an", "object"])),
            Err(FragmentError::NotAnObject)
        );
        assert_eq!(
            LexiconFragment::from_value(&json!({"blacklist": "talg"})),
            Err(FragmentError::InvalidList("blacklist"))
        );
        assert_eq!(
            LexiconFragment::from_value(&json!({"greylist": [42]})),
            Err(FragmentError::InvalidList("greylist"))
        );
        assert_eq!(
            LexiconFragment::from_value(&json!({"enumbers": ["e120"]})),
            Err(FragmentError::InvalidCodeMap)
        );
    }

    #[test]
    fn test_fragment_rejects_bad_codes_and_tags() {
        assert_eq!(
            LexiconFragment::from_value(&json!({"enumbers": {"E120": "maybe"}})),
            Err(FragmentError::MalformedCode("E120".to_string()))
        );
        assert_eq!(
            LexiconFragment::from_value(&json!({"enumbers": {"e120": "vegan"}})),
            Err(FragmentError::UnknownTag(
                "e120".to_string(),
                "vegan".to_string()
            ))
        );
    }

    #[test]
    fn test_is_normalized_code() {
        assert!(is_normalized_code("e120"));
        assert!(is_normalized_code("e1105"));
        assert!(!is_normalized_code("e12"));
        assert!(!is_normalized_code("e12000"));
        assert!(!is_normalized_code("E120"));
        assert!(!is_normalized_code("e12a"));
        assert!(!is_normalized_code("120"));
    }

    #[test]
    fn test_merge_unions_and_overlays() {
        let fragment = LexiconFragment::from_value(&json!({
            "blacklist": ["karmin"],
            "enumbers": {"e120": "maybe", "e904": "not_vegan"}
        }))
        .unwrap();

        let merged = base().merge(&[fragment]);

        assert!(merged.blacklist.contains("gelatine"));
        assert!(merged.blacklist.contains("karmin"));
        // Fragment overrides the base association for e120
        assert_eq!(merged.code_map.get("e120"), Some(&CodeTag::Maybe));
        assert_eq!(merged.code_map.get("e904"), Some(&CodeTag::NotVegan));
    }

    #[test]
    fn test_merge_last_fragment_wins() {
        let first = LexiconFragment::from_value(&json!({"enumbers": {"e471": "maybe"}})).unwrap();
        let second =
            LexiconFragment::from_value(&json!({"enumbers": {"e471": "not_vegan"}})).unwrap();

        let merged = base().merge(&[first, second]);
        assert_eq!(merged.code_map.get("e471"), Some(&CodeTag::NotVegan));
    }

    #[test]
    fn test_merge_does_not_mutate_base() {
        let lex = base();
        let fragment = LexiconFragment::from_value(&json!({"blacklist": ["talg"]})).unwrap();
        let _ = lex.merge(&[fragment]);
        assert!(!lex.blacklist.contains("talg"));
    }

    #[test]
    fn test_merge_idempotent_for_same_fragment() {
        let fragment = LexiconFragment::from_value(&json!({
            "blacklist": ["karmin"],
            "greylist": ["vitamin d3"],
            "enumbers": {"e901": "not_vegan"}
        }))
        .unwrap();

        let once = base().merge(std::slice::from_ref(&fragment));
        let twice = base().merge(&[fragment.clone(), fragment]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_values_skips_malformed() {
        let values = vec![
            json!({"blacklist": ["karmin"]}),
            json!("garbage"),
            json!({"blacklist": 42}),
            json!({"greylist": ["vitamin d3"]}),
        ];

        let merged = base().merge_values(&values);
        assert!(merged.blacklist.contains("karmin"));
        assert!(merged.greylist.contains("vitamin d3"));
        // Base survives intact alongside the two valid fragments
        assert!(merged.blacklist.contains("gelatine"));
    }

    #[test]
    fn test_lexicon_json_shape() {
        let lex = base();
        let value = serde_json::to_value(&lex).unwrap();
        assert!(value.get("enumbers").is_some());
        assert_eq!(value["enumbers"]["e120"], "not_vegan");

        let back: Lexicon = serde_json::from_value(value).unwrap();
        assert_eq!(back, lex);
    }
}

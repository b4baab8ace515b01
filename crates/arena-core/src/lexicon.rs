//! A world's lexicon maps ability keys to full ability records.
//!
//! Lexicon files may carry other sections (types, NPC blueprints); only
//! `abilities` is read here and the rest is ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ability::RawAbility;
use crate::error::{CoreResult, read_file};

/// Ability definitions keyed by the names characters refer to them by.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    /// Ability records by key.
    #[serde(default)]
    pub abilities: BTreeMap<String, RawAbility>,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a lexicon from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a lexicon from a JSON file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        Self::from_json(&read_file(path)?)
    }

    /// Add or replace an ability definition.
    pub fn insert(&mut self, key: impl Into<String>, ability: RawAbility) {
        self.abilities.insert(key.into(), ability);
    }

    /// Look up an ability by key.
    pub fn ability(&self, key: &str) -> Option<&RawAbility> {
        self.abilities.get(key)
    }

    /// Number of ability definitions.
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Returns true if the lexicon defines no abilities.
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_other_sections() {
        let lexicon = Lexicon::from_json(
            r#"{
                "abilities": {
                    "slash": {"name": "Slash", "power": 20, "accuracy": 90}
                },
                "types": ["fire", "water"],
                "npcs": {}
            }"#,
        )
        .unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(
            lexicon.ability("slash").and_then(|a| a.name.as_deref()),
            Some("Slash")
        );
        assert!(lexicon.ability("Slash").is_none());
    }

    #[test]
    fn empty_object_is_empty_lexicon() {
        let lexicon = Lexicon::from_json("{}").unwrap();
        assert!(lexicon.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Lexicon::from_json("not json").is_err());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Lexicon::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}

//! Combatant snapshots and the typed records ingested from them.
//!
//! A snapshot is what editors and world tools hand over: a loosely typed
//! JSON object. [`CombatantSnapshot::ingest`] resolves abilities against a
//! [`Lexicon`] and coerces every field, producing a [`CombatantRecord`] the
//! engine can use without further checks.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ability::{Ability, AbilityEntry};
use crate::error::{CoreResult, read_file};
use crate::item::{Item, RawItem};
use crate::lexicon::Lexicon;
use crate::modifier::{RawTrait, Trait};
use crate::stat::Stat;
use crate::substitution::{Ingested, Notes, Substitution};
use crate::value;

/// A character or blueprint as supplied by an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSnapshot {
    /// Display name.
    pub name: String,
    /// Character level. Informational only; defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Value>,
    /// Base attribute values keyed by stat name.
    #[serde(default)]
    pub base_stats: BTreeMap<String, Value>,
    /// Modifier groups.
    #[serde(default)]
    pub traits: Vec<RawTrait>,
    /// Carried items.
    #[serde(default)]
    pub inventory: Vec<RawItem>,
    /// Abilities, as lexicon keys or inline records.
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
    /// Current health, if already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<Value>,
    /// Maximum health, if already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp_max: Option<Value>,
}

impl CombatantSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        Self::from_json(&read_file(path)?)
    }

    /// Turn this snapshot into a typed record.
    ///
    /// The snapshot is left untouched. Every dropped or defaulted value is
    /// reported in the returned substitutions.
    pub fn ingest(&self, lexicon: &Lexicon) -> Ingested<CombatantRecord> {
        let mut notes = Notes::default();

        let mut base_stats = BTreeMap::new();
        for (key, raw) in &self.base_stats {
            let Some(stat) = Stat::from_key(key) else {
                notes.push(Substitution::UnknownStat {
                    context: self.name.clone(),
                    key: key.clone(),
                });
                continue;
            };
            let v = value::number_or_zero(raw, &self.name, key, &mut notes);
            base_stats.insert(stat, v.round() as i32);
        }

        let traits = self
            .traits
            .iter()
            .enumerate()
            .map(|(i, t)| t.ingest(i, &mut notes))
            .collect();
        let inventory = self
            .inventory
            .iter()
            .filter_map(|i| i.ingest(&mut notes))
            .collect();
        let abilities = self
            .abilities
            .iter()
            .map(|a| a.resolve(lexicon, &mut notes))
            .collect();

        let level = value::number_or(self.level.as_ref(), 1.0, &self.name, "level", &mut notes);
        let hp = value::optional_number(self.hp.as_ref(), &self.name, "hp", &mut notes);
        let hp_max = value::optional_number(self.hp_max.as_ref(), &self.name, "hpMax", &mut notes);

        notes.finish(CombatantRecord {
            name: self.name.clone(),
            level: level.round().clamp(0.0, f64::from(u32::MAX)) as u32,
            base_stats,
            traits,
            inventory,
            abilities,
            hp: hp.map(health_value),
            hp_max: hp_max.map(health_value),
        })
    }
}

fn health_value(n: f64) -> i32 {
    n.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// A fully typed combatant definition, ready to enter an encounter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantRecord {
    /// Display name.
    pub name: String,
    /// Character level.
    pub level: u32,
    /// Base attributes. Stats absent here are absent for the whole encounter.
    pub base_stats: BTreeMap<Stat, i32>,
    /// Modifier groups.
    pub traits: Vec<Trait>,
    /// Carried items.
    pub inventory: Vec<Item>,
    /// Resolved abilities.
    pub abilities: Vec<Ability>,
    /// Current health, if already known.
    pub hp: Option<i32>,
    /// Maximum health, if already known.
    pub hp_max: Option<i32>,
}

impl CombatantRecord {
    /// Create a level 1 record with no stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            ..Self::default()
        }
    }

    /// Set a base stat.
    pub fn with_stat(mut self, stat: Stat, value: i32) -> Self {
        self.base_stats.insert(stat, value);
        self
    }

    /// Set every stat from `(stat, value)` pairs.
    pub fn with_stats(mut self, stats: impl IntoIterator<Item = (Stat, i32)>) -> Self {
        self.base_stats.extend(stats);
        self
    }

    /// Add a trait.
    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.push(t);
        self
    }

    /// Add an inventory item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }

    /// Add an ability.
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Pre-set current and maximum health.
    pub fn with_health(mut self, hp: i32, hp_max: i32) -> Self {
        self.hp = Some(hp);
        self.hp_max = Some(hp_max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::RawAbility;
    use crate::modifier::Modifier;
    use crate::stat::StatKey;
    use serde_json::json;

    fn knight_json() -> &'static str {
        r#"{
            "name": "Kael",
            "level": 3,
            "baseStats": {
                "strength": 12, "dexterity": 8, "constitution": 10,
                "endurance": 9, "intelligence": 7, "charisma": 6, "fortitude": 11
            },
            "traits": [
                {"name": "Brave", "stats": [{"stat": "strength", "value": 2}]}
            ],
            "inventory": [
                {"name": "Potion", "heal": 20, "stackable": true, "quantity": 3, "maxStack": 10}
            ],
            "abilities": ["slash", {"name": "Shield Bash", "power": 10, "defendStat": "constitution"}]
        }"#
    }

    fn lexicon() -> Lexicon {
        let mut lexicon = Lexicon::new();
        lexicon.insert(
            "slash",
            serde_json::from_value::<RawAbility>(json!({"name": "Slash", "power": 20, "accuracy": 90}))
                .unwrap(),
        );
        lexicon
    }

    #[test]
    fn ingest_full_snapshot() {
        let snapshot = CombatantSnapshot::from_json(knight_json()).unwrap();
        let ingested = snapshot.ingest(&lexicon());
        assert!(ingested.is_clean(), "{:?}", ingested.substitutions);

        let record = ingested.value;
        assert_eq!(record.name, "Kael");
        assert_eq!(record.level, 3);
        assert_eq!(record.base_stats.len(), 7);
        assert_eq!(record.base_stats[&Stat::Strength], 12);
        assert_eq!(record.traits[0].modifiers, vec![Modifier::add(Stat::Strength, 2.0)]);
        assert_eq!(record.inventory[0].quantity, 3);
        assert_eq!(record.abilities[0].name, "Slash");
        assert_eq!(record.abilities[0].accuracy, 90.0);
        assert_eq!(record.abilities[1].name, "Shield Bash");
        assert_eq!(record.abilities[1].defend_stat, StatKey::Known(Stat::Constitution));
        assert_eq!(record.hp, None);
    }

    #[test]
    fn ingest_does_not_mutate_snapshot() {
        let snapshot = CombatantSnapshot::from_json(knight_json()).unwrap();
        let before = serde_json::to_value(&snapshot).unwrap();
        let _ = snapshot.ingest(&lexicon());
        assert_eq!(serde_json::to_value(&snapshot).unwrap(), before);
    }

    #[test]
    fn ingest_reports_every_substitution() {
        let snapshot = CombatantSnapshot::from_json(
            r#"{
                "name": "Goblin",
                "baseStats": {"strength": "tough", "luck": 4},
                "traits": [{"name": "Sturdy", "stats": [{"stat": "hp", "value": 5}]}],
                "abilities": ["claw"]
            }"#,
        )
        .unwrap();
        let ingested = snapshot.ingest(&Lexicon::new());
        let record = &ingested.value;

        assert_eq!(record.level, 1);
        assert_eq!(record.base_stats.get(&Stat::Strength), Some(&0));
        assert!(!record.base_stats.contains_key(&Stat::Dexterity));
        assert!(record.traits[0].modifiers.is_empty());
        assert_eq!(record.abilities[0], Ability::placeholder("claw"));

        assert_eq!(ingested.substitutions.len(), 4);
        assert!(ingested.substitutions.contains(&Substitution::UnknownStat {
            context: "Goblin".to_string(),
            key: "luck".to_string(),
        }));
        assert!(ingested.substitutions.contains(&Substitution::UnresolvedAbility {
            key: "claw".to_string(),
        }));
    }

    #[test]
    fn preset_health_passes_through() {
        let snapshot =
            CombatantSnapshot::from_json(r#"{"name": "Hurt", "hp": 12, "hpMax": 40}"#).unwrap();
        let record = snapshot.ingest(&Lexicon::new()).into_value();
        assert_eq!(record.hp, Some(12));
        assert_eq!(record.hp_max, Some(40));
    }

    #[test]
    fn loose_level_and_health_values_are_coerced() {
        let snapshot = CombatantSnapshot::from_json(
            r#"{"name": "Loose", "level": -1, "hp": "50", "hpMax": 80.4}"#,
        )
        .unwrap();
        let ingested = snapshot.ingest(&Lexicon::new());
        assert!(ingested.is_clean(), "{:?}", ingested.substitutions);
        assert_eq!(ingested.value.level, 0);
        assert_eq!(ingested.value.hp, Some(50));
        assert_eq!(ingested.value.hp_max, Some(80));
    }

    #[test]
    fn non_numeric_health_is_left_unset() {
        let snapshot = CombatantSnapshot::from_json(
            r#"{"name": "Odd", "level": "high", "hp": "most", "hpMax": null}"#,
        )
        .unwrap();
        let ingested = snapshot.ingest(&Lexicon::new());
        assert_eq!(ingested.value.level, 0);
        assert_eq!(ingested.value.hp, None);
        assert_eq!(ingested.value.hp_max, None);
        assert_eq!(
            ingested.substitutions,
            vec![
                Substitution::NonNumericValue {
                    context: "Odd".to_string(),
                    field: "level".to_string(),
                },
                Substitution::IgnoredValue {
                    context: "Odd".to_string(),
                    field: "hp".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_stacks_leave_the_inventory() {
        let snapshot = CombatantSnapshot::from_json(
            r#"{"name": "Kael", "inventory": [
                {"name": "Potion", "stackable": true, "quantity": 0, "heal": 40},
                {"name": "Ether", "stackable": true, "quantity": 2}
            ]}"#,
        )
        .unwrap();
        let ingested = snapshot.ingest(&Lexicon::new());
        assert_eq!(ingested.value.inventory.len(), 1);
        assert_eq!(ingested.value.inventory[0].name, "Ether");
        assert_eq!(
            ingested.substitutions,
            vec![Substitution::EmptyStack {
                item: "Potion".to_string()
            }]
        );
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(CombatantSnapshot::from_json(r#"{"level": 2}"#).is_err());
    }
}

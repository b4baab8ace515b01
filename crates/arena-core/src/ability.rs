use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lexicon::Lexicon;
use crate::stat::{Stat, StatKey};
use crate::substitution::{Notes, Substitution};
use crate::value;

/// A fully resolved combat action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    /// Display name.
    pub name: String,
    /// Base damage before stat scaling.
    pub power: f64,
    /// Hit chance in percent (0-100).
    pub accuracy: f64,
    /// The attacker's stat that scales damage up.
    pub attack_stat: StatKey,
    /// The defender's stat that scales damage down.
    pub defend_stat: StatKey,
    /// Multiplier on the user's dexterity when ordering turns.
    pub speed_multiplier: f64,
}

impl Ability {
    /// Default power.
    pub const DEFAULT_POWER: f64 = 0.0;
    /// Default accuracy: never misses.
    pub const DEFAULT_ACCURACY: f64 = 100.0;
    /// Default speed multiplier.
    pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;

    /// Create an ability with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            power: Self::DEFAULT_POWER,
            accuracy: Self::DEFAULT_ACCURACY,
            attack_stat: StatKey::Known(Stat::Strength),
            defend_stat: StatKey::Known(Stat::Fortitude),
            speed_multiplier: Self::DEFAULT_SPEED_MULTIPLIER,
        }
    }

    /// The zero-power "Attack" used when a combatant has no abilities.
    pub fn default_attack() -> Self {
        Self::new("Attack")
    }

    /// The zero-power stand-in for a key the lexicon does not define.
    pub fn placeholder(key: impl Into<String>) -> Self {
        Self::new(key)
    }

    /// Set the power.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Set the accuracy.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Set the attack and defense stat bindings.
    pub fn with_stats(mut self, attack: Stat, defend: Stat) -> Self {
        self.attack_stat = StatKey::Known(attack);
        self.defend_stat = StatKey::Known(defend);
        self
    }

    /// Set the speed multiplier.
    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }
}

/// An ability record as it appears in external data. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAbility {
    /// Display name. Falls back to the lexicon key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base damage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Value>,
    /// Hit chance in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Value>,
    /// Attacker stat key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_stat: Option<String>,
    /// Defender stat key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defend_stat: Option<String>,
    /// Turn-order multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_multiplier: Option<Value>,
}

impl RawAbility {
    pub(crate) fn ingest(&self, fallback_name: &str, notes: &mut Notes) -> Ability {
        let name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        let power = value::number_or(self.power.as_ref(), Ability::DEFAULT_POWER, &name, "power", notes);
        let accuracy = value::number_or(
            self.accuracy.as_ref(),
            Ability::DEFAULT_ACCURACY,
            &name,
            "accuracy",
            notes,
        );
        let speed_multiplier = value::number_or(
            self.speed_multiplier.as_ref(),
            Ability::DEFAULT_SPEED_MULTIPLIER,
            &name,
            "speedMultiplier",
            notes,
        );
        let attack_stat = binding(self.attack_stat.as_deref(), Stat::Strength, &name, notes);
        let defend_stat = binding(self.defend_stat.as_deref(), Stat::Fortitude, &name, notes);

        Ability {
            name,
            power,
            accuracy,
            attack_stat,
            defend_stat,
            speed_multiplier,
        }
    }
}

fn binding(key: Option<&str>, default: Stat, ability: &str, notes: &mut Notes) -> StatKey {
    match key {
        None => StatKey::Known(default),
        Some(k) if k.trim().is_empty() => StatKey::Known(default),
        Some(k) => {
            let parsed = StatKey::parse(k);
            if let StatKey::Other(key) = &parsed {
                notes.push(Substitution::UnknownStatBinding {
                    ability: ability.to_string(),
                    key: key.clone(),
                });
            }
            parsed
        }
    }
}

/// An ability on a combatant: either a bare lexicon key or an inline record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbilityEntry {
    /// A key to look up in the world's lexicon.
    Key(String),
    /// A full (possibly partial) inline record.
    Record(RawAbility),
}

impl AbilityEntry {
    /// Resolve this entry into a full ability.
    ///
    /// Keys missing from the lexicon become a zero-power placeholder named
    /// after the key.
    pub(crate) fn resolve(&self, lexicon: &Lexicon, notes: &mut Notes) -> Ability {
        match self {
            Self::Record(raw) => raw.ingest("Unnamed ability", notes),
            Self::Key(key) => match lexicon.ability(key) {
                Some(raw) => raw.ingest(key, notes),
                None => {
                    notes.push(Substitution::UnresolvedAbility { key: key.clone() });
                    Ability::placeholder(key.clone())
                }
            },
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stat::Stat;
use crate::substitution::{Notes, Substitution};
use crate::value;

/// How a modifier combines with a stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Added to the base value. Negative values subtract.
    Additive,
    /// Multiplies the boosted value, after all additive modifiers are summed.
    Multiplicative,
}

/// What a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierTarget {
    /// One of the seven attributes.
    Stat(Stat),
    /// Direct healing. Only meaningful inside item effects.
    Hp,
}

/// An additive or multiplicative adjustment to one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// The attribute (or `hp`) this modifier adjusts.
    pub target: ModifierTarget,
    /// The modifier amount.
    pub value: f64,
    /// Additive or multiplicative.
    pub kind: ModifierKind,
}

impl Modifier {
    /// An additive modifier on a stat.
    pub fn add(stat: Stat, value: f64) -> Self {
        Self {
            target: ModifierTarget::Stat(stat),
            value,
            kind: ModifierKind::Additive,
        }
    }

    /// A multiplicative modifier on a stat.
    pub fn mult(stat: Stat, value: f64) -> Self {
        Self {
            target: ModifierTarget::Stat(stat),
            value,
            kind: ModifierKind::Multiplicative,
        }
    }

    /// A direct healing amount, for item effects.
    pub fn heal(value: f64) -> Self {
        Self {
            target: ModifierTarget::Hp,
            value,
            kind: ModifierKind::Additive,
        }
    }

    /// The stat this modifier adjusts, or `None` for `hp`.
    pub fn stat(&self) -> Option<Stat> {
        match self.target {
            ModifierTarget::Stat(stat) => Some(stat),
            ModifierTarget::Hp => None,
        }
    }
}

/// A named group of modifiers carried by a combatant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    /// Display name.
    pub name: String,
    /// The modifiers this trait contributes.
    pub modifiers: Vec<Modifier>,
}

impl Trait {
    /// Create a trait from a name and its modifiers.
    pub fn new(name: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            name: name.into(),
            modifiers,
        }
    }
}

/// A modifier as it appears in external data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModifier {
    /// Stat key, or `hp`.
    pub stat: String,
    /// The amount. Expected to be numeric.
    #[serde(default)]
    pub value: Value,
    /// `add` (default), `sub`, or `mult`, plus a few synonyms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A trait as it appears in external data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTrait {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The modifier list.
    #[serde(default, alias = "stats")]
    pub modifiers: Vec<RawModifier>,
}

impl RawTrait {
    pub(crate) fn ingest(&self, index: usize, notes: &mut Notes) -> Trait {
        let context = if self.name.is_empty() {
            format!("trait #{}", index + 1)
        } else {
            self.name.clone()
        };
        let modifiers = self
            .modifiers
            .iter()
            .filter_map(|raw| raw.ingest(&context, false, notes))
            .collect();
        Trait {
            name: context,
            modifiers,
        }
    }
}

impl RawModifier {
    /// Convert to a typed modifier. Unknown stats, and `hp` when `allow_hp`
    /// is false, drop the modifier.
    pub(crate) fn ingest(&self, context: &str, allow_hp: bool, notes: &mut Notes) -> Option<Modifier> {
        let key = self.stat.trim().to_lowercase();
        let target = if key == "hp" {
            if !allow_hp {
                notes.push(Substitution::HpOutsideItem {
                    context: context.to_string(),
                });
                return None;
            }
            ModifierTarget::Hp
        } else if let Some(stat) = Stat::from_key(&key) {
            ModifierTarget::Stat(stat)
        } else {
            notes.push(Substitution::UnknownStat {
                context: context.to_string(),
                key: self.stat.clone(),
            });
            return None;
        };

        let amount = value::number_or_zero(&self.value, context, &self.stat, notes);
        let (kind, value) = match self.kind.as_deref().map(|k| k.trim().to_lowercase()) {
            None => (ModifierKind::Additive, amount),
            Some(k) => match k.as_str() {
                "add" | "additive" | "boost" => (ModifierKind::Additive, amount),
                "sub" | "subtract" => (ModifierKind::Additive, -amount),
                "mult" | "multiply" | "multiplicative" => (ModifierKind::Multiplicative, amount),
                other => {
                    notes.push(Substitution::UnknownModifierKind {
                        context: context.to_string(),
                        kind: other.to_string(),
                    });
                    (ModifierKind::Additive, amount)
                }
            },
        };

        Some(Modifier {
            target,
            value,
            kind,
        })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modifier::{Modifier, ModifierTarget, RawModifier};
use crate::substitution::{Notes, Substitution};
use crate::value;

/// An inventory item.
///
/// Items contribute their stat modifiers to the holder while carried (scaled
/// by quantity for stacks) and can be used once per turn for healing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Flat healing on use.
    pub heal: f64,
    /// Stat modifiers. `hp` entries add to the healing amount instead.
    pub stats: Vec<Modifier>,
    /// Whether several copies share one inventory slot.
    pub stackable: bool,
    /// Copies in this slot. Always 1 for non-stackable items.
    pub quantity: u32,
    /// Largest allowed stack; 0 means unbounded.
    pub max_stack: u32,
}

impl Item {
    /// A single, non-stackable item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heal: 0.0,
            stats: Vec::new(),
            stackable: false,
            quantity: 1,
            max_stack: 1,
        }
    }

    /// A stack of `quantity` copies with no stack limit.
    pub fn stack(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            stackable: true,
            quantity,
            max_stack: 0,
            ..Self::new(name)
        }
    }

    /// Returns true for a stack with nothing left in it.
    pub fn is_spent(&self) -> bool {
        self.stackable && self.quantity == 0
    }

    /// Set the flat healing amount.
    pub fn with_heal(mut self, heal: f64) -> Self {
        self.heal = heal;
        self
    }

    /// Add a modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.stats.push(modifier);
        self
    }

    /// Total healing on use: the flat amount plus every `hp` modifier.
    pub fn heal_amount(&self) -> f64 {
        self.heal
            + self
                .stats
                .iter()
                .filter(|m| m.target == ModifierTarget::Hp)
                .map(|m| m.value)
                .sum::<f64>()
    }

    /// The factor applied to this item's stat modifiers: the quantity for a
    /// stack, 1 otherwise.
    pub fn modifier_scale(&self) -> f64 {
        if self.stackable {
            f64::from(self.quantity)
        } else {
            1.0
        }
    }
}

/// An item as it appears in external data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    /// Display name.
    pub name: String,
    /// Flat healing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal: Option<Value>,
    /// Stat modifiers, including `hp`.
    #[serde(default)]
    pub stats: Vec<RawModifier>,
    /// Whether the item stacks.
    #[serde(default)]
    pub stackable: bool,
    /// Stack size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    /// Maximum stack size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stack: Option<Value>,
}

impl RawItem {
    /// Returns `None` for a stackable item with nothing left in the stack.
    pub(crate) fn ingest(&self, notes: &mut Notes) -> Option<Item> {
        let context = self.name.as_str();
        let heal = value::number_or(self.heal.as_ref(), 0.0, context, "heal", notes);
        let stats = self
            .stats
            .iter()
            .filter_map(|raw| raw.ingest(context, true, notes))
            .collect();

        if !self.stackable {
            return Some(Item {
                name: self.name.clone(),
                heal,
                stats,
                stackable: false,
                quantity: 1,
                max_stack: 1,
            });
        }

        let max_stack = count(self.max_stack.as_ref(), 0, context, "maxStack", notes);
        let given = count(self.quantity.as_ref(), 1, context, "quantity", notes);
        if given == 0 {
            notes.push(Substitution::EmptyStack {
                item: self.name.clone(),
            });
            return None;
        }
        let quantity = if max_stack > 0 && given > max_stack {
            notes.push(Substitution::QuantityClamped {
                item: self.name.clone(),
                given,
                max_stack,
            });
            max_stack
        } else {
            given
        };

        Some(Item {
            name: self.name.clone(),
            heal,
            stats,
            stackable: true,
            quantity,
            max_stack,
        })
    }
}

/// Read a non-negative whole count, rounding fractions and flooring at 0.
fn count(raw: Option<&Value>, default: u32, context: &str, field: &str, notes: &mut Notes) -> u32 {
    let n = value::number_or(raw, f64::from(default), context, field, notes);
    n.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::Stat;
    use serde_json::json;

    fn ingest_opt(json: Value) -> (Option<Item>, Vec<Substitution>) {
        let raw: RawItem = serde_json::from_value(json).unwrap();
        let mut notes = Notes::default();
        let item = raw.ingest(&mut notes);
        (item, notes.finish(()).substitutions)
    }

    fn ingest(json: Value) -> (Item, Vec<Substitution>) {
        let (item, subs) = ingest_opt(json);
        (item.unwrap(), subs)
    }

    #[test]
    fn heal_amount_includes_hp_modifiers() {
        let item = Item::new("Elixir")
            .with_heal(10.0)
            .with_modifier(Modifier::heal(15.0))
            .with_modifier(Modifier::add(Stat::Strength, 3.0));
        assert_eq!(item.heal_amount(), 25.0);
    }

    #[test]
    fn modifier_scale_tracks_quantity() {
        assert_eq!(Item::new("Ring").modifier_scale(), 1.0);
        assert_eq!(Item::stack("Charm", 3).modifier_scale(), 3.0);
    }

    #[test]
    fn non_stackable_quantity_is_one() {
        let (item, subs) = ingest(json!({"name": "Sword", "quantity": 5}));
        assert!(!item.stackable);
        assert_eq!(item.quantity, 1);
        assert!(subs.is_empty());
    }

    #[test]
    fn stackable_defaults_to_one() {
        let (item, _) = ingest(json!({"name": "Potion", "stackable": true}));
        assert!(item.stackable);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.max_stack, 0);
    }

    #[test]
    fn quantity_clamped_to_max_stack() {
        let (item, subs) = ingest(json!({
            "name": "Potion", "stackable": true, "quantity": 12, "maxStack": 10
        }));
        assert_eq!(item.quantity, 10);
        assert_eq!(
            subs,
            vec![Substitution::QuantityClamped {
                item: "Potion".to_string(),
                given: 12,
                max_stack: 10,
            }]
        );
    }

    #[test]
    fn item_stats_accept_hp() {
        let (item, subs) = ingest(json!({
            "name": "Potion",
            "heal": 5,
            "stats": [{"stat": "hp", "value": 20}, {"stat": "dexterity", "value": 2}]
        }));
        assert_eq!(item.heal_amount(), 25.0);
        assert_eq!(item.stats.len(), 2);
        assert!(subs.is_empty());
    }

    #[test]
    fn empty_stacks_are_dropped() {
        for quantity in [json!(0), json!(-3), json!(0.2)] {
            let (item, subs) = ingest_opt(json!({
                "name": "Potion", "stackable": true, "heal": 40, "quantity": quantity
            }));
            assert_eq!(item, None);
            assert_eq!(
                subs,
                vec![Substitution::EmptyStack {
                    item: "Potion".to_string()
                }]
            );
        }
    }

    #[test]
    fn non_stackable_ignores_zero_quantity() {
        let (item, subs) = ingest(json!({"name": "Sword", "quantity": 0}));
        assert_eq!(item.quantity, 1);
        assert!(subs.is_empty());
    }
}

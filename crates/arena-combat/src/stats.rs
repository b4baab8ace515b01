//! Effective stat aggregation.
//!
//! Every stat resolves as `(base + Σ additive) × Π multiplicative`. All
//! additive modifiers are summed before any multiplier applies, whatever the
//! source (trait or item) and whatever order the modifiers arrive in.

use std::collections::BTreeMap;

use arena_core::{Item, Modifier, ModifierKind, Stat, StatKey, Trait};
use serde::Serialize;

/// The post-modifier stat set used for all combat math.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FinalStats {
    values: BTreeMap<Stat, f64>,
}

/// The result of looking up a stat binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatLookup {
    /// The combatant has this stat.
    Found(f64),
    /// The stat is absent (or the binding is not a known stat); counts as 0.
    Missing,
}

impl StatLookup {
    /// The numeric value, 0 when missing.
    pub fn value(self) -> f64 {
        match self {
            Self::Found(v) => v,
            Self::Missing => 0.0,
        }
    }

    /// Returns true if the lookup fell back to 0.
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl FinalStats {
    /// Look up a stat binding.
    pub fn lookup(&self, key: &StatKey) -> StatLookup {
        key.stat()
            .and_then(|stat| self.get(stat))
            .map_or(StatLookup::Missing, StatLookup::Found)
    }

    /// The value of a stat, if the combatant has it.
    pub fn get(&self, stat: Stat) -> Option<f64> {
        self.values.get(&stat).copied()
    }

    /// The value of a stat, 0 if absent.
    pub fn value(&self, stat: Stat) -> f64 {
        self.get(stat).unwrap_or(0.0)
    }

    /// Iterate stats in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        self.values.iter().map(|(s, v)| (*s, *v))
    }

    /// Number of stats present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no stats are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Combine base stats with trait and inventory modifiers.
///
/// Trait modifiers are flattened across all traits. Modifiers of a stackable
/// item are scaled by its current quantity.
pub fn aggregate(base: &BTreeMap<Stat, i32>, traits: &[Trait], inventory: &[Item]) -> FinalStats {
    let from_traits = traits.iter().flat_map(|t| t.modifiers.iter().copied());
    let from_items = inventory.iter().flat_map(|item| {
        let scale = item.modifier_scale();
        item.stats.iter().map(move |m| Modifier {
            value: m.value * scale,
            ..*m
        })
    });
    aggregate_modifiers(base, from_traits.chain(from_items))
}

/// Apply a flat list of modifiers to base stats.
///
/// Modifiers for stats absent from `base`, and `hp` modifiers, are skipped.
pub fn aggregate_modifiers(
    base: &BTreeMap<Stat, i32>,
    modifiers: impl IntoIterator<Item = Modifier>,
) -> FinalStats {
    // (boost, mult) per stat
    let mut acc: BTreeMap<Stat, (f64, f64)> = base.keys().map(|&s| (s, (0.0, 1.0))).collect();

    for m in modifiers {
        let Some((boost, mult)) = m.stat().and_then(|stat| acc.get_mut(&stat)) else {
            continue;
        };
        match m.kind {
            ModifierKind::Additive => *boost += m.value,
            ModifierKind::Multiplicative => *mult *= m.value,
        }
    }

    let values = base
        .iter()
        .map(|(stat, b)| {
            let (boost, mult) = acc[stat];
            (*stat, (f64::from(*b) + boost) * mult)
        })
        .collect();
    FinalStats { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base(pairs: &[(Stat, i32)]) -> BTreeMap<Stat, i32> {
        pairs.iter().copied().collect()
    }

    fn full_base() -> BTreeMap<Stat, i32> {
        Stat::ALL.iter().enumerate().map(|(i, s)| (*s, i as i32 * 3 + 4)).collect()
    }

    #[test]
    fn no_modifiers_means_base() {
        let base = full_base();
        let stats = aggregate(&base, &[], &[]);
        for (stat, b) in &base {
            assert_eq!(stats.get(*stat), Some(f64::from(*b)));
        }
    }

    #[test]
    fn boosts_sum_before_multiplier() {
        let base = base(&[(Stat::Strength, 10)]);
        let traits = [Trait::new(
            "Rage",
            vec![
                Modifier::mult(Stat::Strength, 2.0),
                Modifier::add(Stat::Strength, 3.0),
            ],
        )];
        let inventory = [Item::new("Gauntlet").with_modifier(Modifier::add(Stat::Strength, 5.0))];
        let stats = aggregate(&base, &traits, &inventory);
        assert_eq!(stats.value(Stat::Strength), 36.0);
    }

    #[test]
    fn negative_additive_subtracts() {
        let base = base(&[(Stat::Dexterity, 10)]);
        let traits = [Trait::new("Limp", vec![Modifier::add(Stat::Dexterity, -4.0)])];
        assert_eq!(aggregate(&base, &traits, &[]).value(Stat::Dexterity), 6.0);
    }

    #[test]
    fn stackable_items_scale_with_quantity() {
        let base = base(&[(Stat::Fortitude, 10)]);
        let charms = Item::stack("Charm", 3).with_modifier(Modifier::add(Stat::Fortitude, 2.0));
        let stats = aggregate(&base, &[], &[charms]);
        assert_eq!(stats.value(Stat::Fortitude), 16.0);
    }

    #[test]
    fn stackable_multipliers_scale_too() {
        let base = base(&[(Stat::Fortitude, 10)]);
        let charms = Item::stack("Charm", 2).with_modifier(Modifier::mult(Stat::Fortitude, 1.5));
        let stats = aggregate(&base, &[], &[charms]);
        assert_eq!(stats.value(Stat::Fortitude), 30.0);
    }

    #[test]
    fn modifiers_for_absent_stats_are_ignored() {
        let base = base(&[(Stat::Strength, 10)]);
        let traits = [Trait::new("Wise", vec![Modifier::add(Stat::Intelligence, 5.0)])];
        let stats = aggregate(&base, &traits, &[]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.get(Stat::Intelligence), None);
    }

    #[test]
    fn hp_modifiers_do_not_touch_stats() {
        let base = full_base();
        let potion = Item::new("Potion").with_modifier(Modifier::heal(50.0));
        assert_eq!(aggregate(&base, &[], &[potion]), aggregate(&base, &[], &[]));
    }

    #[test]
    fn lookup_reports_missing() {
        let stats = aggregate(&base(&[(Stat::Strength, 7)]), &[], &[]);
        assert_eq!(stats.lookup(&StatKey::Known(Stat::Strength)), StatLookup::Found(7.0));
        assert!(stats.lookup(&StatKey::Known(Stat::Charisma)).is_missing());
        let other = stats.lookup(&StatKey::Other("luck".to_string()));
        assert!(other.is_missing());
        assert_eq!(other.value(), 0.0);
    }

    fn modifier_strategy() -> impl Strategy<Value = Modifier> {
        (0..Stat::ALL.len(), -20i32..20, prop::bool::ANY, prop::sample::select(vec![0.5, 1.5, 2.0, -1.0]))
            .prop_map(|(i, add, additive, mult)| {
                if additive {
                    Modifier::add(Stat::ALL[i], f64::from(add))
                } else {
                    Modifier::mult(Stat::ALL[i], mult)
                }
            })
    }

    proptest! {
        #[test]
        fn order_of_modifiers_never_matters(
            (mods, shuffled) in prop::collection::vec(modifier_strategy(), 0..16)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let base = full_base();
            let a = aggregate_modifiers(&base, mods);
            let b = aggregate_modifiers(&base, shuffled);
            for stat in Stat::ALL {
                prop_assert!((a.value(stat) - b.value(stat)).abs() < 1e-9);
            }
        }

        #[test]
        fn two_boosts_and_a_multiplier(
            b in -100i32..100,
            b1 in -50i32..50,
            b2 in -50i32..50,
            m in prop::sample::select(vec![0.25, 0.5, 1.0, 2.0, 3.0]),
            mult_first in prop::bool::ANY,
        ) {
            let base: BTreeMap<Stat, i32> = [(Stat::Strength, b)].into_iter().collect();
            let mut mods = vec![
                Modifier::add(Stat::Strength, f64::from(b1)),
                Modifier::add(Stat::Strength, f64::from(b2)),
            ];
            let multiplier = Modifier::mult(Stat::Strength, m);
            if mult_first {
                mods.insert(0, multiplier);
            } else {
                mods.push(multiplier);
            }
            let expected = f64::from(b + b1 + b2) * m;
            prop_assert_eq!(aggregate_modifiers(&base, mods).value(Stat::Strength), expected);
        }
    }
}

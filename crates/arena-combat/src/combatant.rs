//! Combatants: a record brought to life for one encounter.
//!
//! A combatant owns a deep copy of its record, so nothing that happens in
//! battle (damage, consumed items) leaks back into the source data.

use std::borrow::Cow;
use std::collections::BTreeMap;

use arena_core::{Ability, CombatantRecord, Item, Stat, Trait};
use serde::{Deserialize, Serialize};

use crate::health::{Health, max_health};
use crate::stats::{FinalStats, aggregate};

/// Which role a combatant plays in an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The controlled side.
    Player,
    /// The opposing side, driven by a random policy.
    Enemy,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// A participant in an encounter.
#[derive(Debug, Clone)]
pub struct Combatant {
    side: Side,
    name: String,
    level: u32,
    base_stats: BTreeMap<Stat, i32>,
    traits: Vec<Trait>,
    inventory: Vec<Item>,
    abilities: Vec<Ability>,
    final_stats: FinalStats,
    health: Health,
}

impl Combatant {
    /// Create a combatant from a record.
    ///
    /// Final stats are computed immediately. Maximum health comes from the
    /// record if set, otherwise from the final stats; current health defaults
    /// to the maximum.
    pub fn new(side: Side, record: CombatantRecord) -> Self {
        let final_stats = aggregate(&record.base_stats, &record.traits, &record.inventory);
        let max = record.hp_max.unwrap_or_else(|| max_health(&final_stats));
        let health = match record.hp {
            Some(hp) => Health::with_current(hp, max),
            None => Health::new(max),
        };
        Self {
            side,
            name: record.name,
            level: record.level,
            base_stats: record.base_stats,
            traits: record.traits,
            inventory: record.inventory,
            abilities: record.abilities,
            final_stats,
            health,
        }
    }

    /// The side this combatant fights on.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Character level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Base stats, before modifiers.
    pub fn base_stats(&self) -> &BTreeMap<Stat, i32> {
        &self.base_stats
    }

    /// Modifier groups.
    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    /// Current inventory.
    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// The combatant's own abilities, possibly empty.
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    /// The abilities this combatant can choose from in a round.
    ///
    /// A combatant without abilities gets the default zero-power "Attack".
    pub fn available_abilities(&self) -> Cow<'_, [Ability]> {
        if self.abilities.is_empty() {
            Cow::Owned(vec![Ability::default_attack()])
        } else {
            Cow::Borrowed(&self.abilities)
        }
    }

    /// Effective stats.
    pub fn final_stats(&self) -> &FinalStats {
        &self.final_stats
    }

    /// Current and maximum health.
    pub fn health(&self) -> Health {
        self.health
    }

    /// Current health.
    pub fn hp(&self) -> i32 {
        self.health.current
    }

    /// Maximum health.
    pub fn hp_max(&self) -> i32 {
        self.health.max
    }

    /// Returns true once health has reached 0.
    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    pub(crate) fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    /// Recompute final stats from base stats, traits, and current inventory.
    pub fn recompute_stats(&mut self) {
        self.final_stats = aggregate(&self.base_stats, &self.traits, &self.inventory);
    }

    /// Drop an inventory slot entirely. Final stats are recomputed.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index >= self.inventory.len() {
            return None;
        }
        let item = self.inventory.remove(index);
        self.recompute_stats();
        Some(item)
    }

    /// Use up one copy of an item. A stack shrinks by one and disappears at
    /// 0; a single item is removed. Final stats are recomputed.
    ///
    /// Returns the remaining quantity (0 once the slot is gone).
    pub(crate) fn consume_item(&mut self, index: usize) -> Option<u32> {
        let item = self.inventory.get_mut(index)?;
        let remaining = if item.stackable {
            item.quantity = item.quantity.saturating_sub(1);
            item.quantity
        } else {
            0
        };
        if remaining == 0 {
            self.inventory.remove(index);
        }
        self.recompute_stats();
        Some(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::Modifier;

    fn record() -> CombatantRecord {
        CombatantRecord::new("Kael").with_stats([
            (Stat::Strength, 3),
            (Stat::Dexterity, 2),
            (Stat::Fortitude, 5),
        ])
    }

    #[test]
    fn new_computes_health_from_stats() {
        let c = Combatant::new(Side::Player, record());
        assert_eq!(c.hp_max(), 58);
        assert_eq!(c.hp(), 58);
        assert!(!c.is_defeated());
    }

    #[test]
    fn preset_health_is_respected() {
        let c = Combatant::new(Side::Enemy, record().with_health(12, 40));
        assert_eq!(c.hp(), 12);
        assert_eq!(c.hp_max(), 40);
    }

    #[test]
    fn preset_hp_without_max_uses_derived_max() {
        let mut r = record();
        r.hp = Some(500);
        let c = Combatant::new(Side::Enemy, r);
        assert_eq!(c.hp(), 58);
    }

    #[test]
    fn empty_ability_list_offers_default_attack() {
        let c = Combatant::new(Side::Enemy, record());
        assert!(c.abilities().is_empty());
        assert_eq!(c.available_abilities().as_ref(), &[Ability::default_attack()]);
    }

    #[test]
    fn consuming_a_stack_recomputes_stats() {
        let charms = Item::stack("Charm", 2).with_modifier(Modifier::add(Stat::Strength, 1.0));
        let mut c = Combatant::new(Side::Player, record().with_item(charms));
        assert_eq!(c.final_stats().value(Stat::Strength), 5.0);

        assert_eq!(c.consume_item(0), Some(1));
        assert_eq!(c.final_stats().value(Stat::Strength), 4.0);

        assert_eq!(c.consume_item(0), Some(0));
        assert!(c.inventory().is_empty());
        assert_eq!(c.final_stats().value(Stat::Strength), 3.0);
    }

    #[test]
    fn consuming_a_single_item_removes_it() {
        let mut c = Combatant::new(Side::Player, record().with_item(Item::new("Bomb")));
        assert_eq!(c.consume_item(0), Some(0));
        assert!(c.inventory().is_empty());
        assert_eq!(c.consume_item(0), None);
    }

    #[test]
    fn remove_item_recomputes_stats() {
        let ring = Item::new("Ring").with_modifier(Modifier::mult(Stat::Dexterity, 2.0));
        let mut c = Combatant::new(Side::Player, record().with_item(ring));
        assert_eq!(c.final_stats().value(Stat::Dexterity), 4.0);
        assert_eq!(c.remove_item(0).map(|i| i.name), Some("Ring".to_string()));
        assert_eq!(c.final_stats().value(Stat::Dexterity), 2.0);
        assert!(c.remove_item(0).is_none());
    }

    #[test]
    fn hp_max_is_not_rederived_after_inventory_changes() {
        let amulet = Item::new("Amulet").with_modifier(Modifier::add(Stat::Fortitude, 5.0));
        let mut c = Combatant::new(Side::Player, record().with_item(amulet));
        assert_eq!(c.hp_max(), 108);
        c.remove_item(0);
        assert_eq!(c.hp_max(), 108);
    }

    #[test]
    fn side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
        assert_eq!(Side::Enemy.to_string(), "enemy");
    }
}

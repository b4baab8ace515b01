//! Resolution of single actions: one ability against a defender, or one
//! item on its user.
//!
//! Nothing here fails. Missing stats count as 0 and an out-of-range item
//! index is a no-op.

use arena_core::Ability;
use tracing::debug;

use crate::chance::Chance;
use crate::combatant::Combatant;
use crate::log::{CombatEvent, CombatLog, EventKind};
use crate::stats::StatLookup;

/// The outcome of one ability use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// The accuracy roll, in `[0, 100)`.
    pub roll: u32,
    /// Whether the ability hit.
    pub hit: bool,
    /// Damage dealt (0 on a miss).
    pub damage: i32,
    /// The attacker's stat lookup. `Missing` when it fell back to 0.
    pub attack: StatLookup,
    /// The defender's stat lookup. `Missing` when it fell back to 0.
    pub defense: StatLookup,
}

/// The outcome of one item use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUse {
    /// Name of the item used.
    pub item: String,
    /// Healing the item provides. Negative for harmful items.
    pub heal: i32,
    /// Signed change in health actually applied after clamping.
    pub restored: i32,
    /// Copies left in the slot; 0 means the slot was removed.
    pub remaining: u32,
}

/// Returns true when a roll misses. Equal to accuracy is a hit.
pub fn is_miss(roll: u32, accuracy: f64) -> bool {
    f64::from(roll) > accuracy
}

/// `round(max(0, power × (1 + atk/100 − def/100)))`.
pub fn compute_damage(power: f64, attack: f64, defense: f64) -> i32 {
    let raw = power * (1.0 + attack / 100.0 - defense / 100.0);
    raw.max(0.0).round().min(f64::from(i32::MAX)) as i32
}

/// Resolve `ability` from `attacker` against `defender`.
///
/// A miss logs a single [`EventKind::Miss`] and changes nothing. A hit logs
/// [`EventKind::AbilityUsed`], applies damage, then logs
/// [`EventKind::Damage`] on the defender's side.
pub fn resolve<C: Chance + ?Sized>(
    attacker: &Combatant,
    defender: &mut Combatant,
    ability: &Ability,
    chance: &mut C,
    log: &mut CombatLog,
) -> Resolution {
    let roll = chance.percent();
    let attack = attacker.final_stats().lookup(&ability.attack_stat);
    let defense = defender.final_stats().lookup(&ability.defend_stat);

    if is_miss(roll, ability.accuracy) {
        debug!(attacker = attacker.name(), ability = %ability.name, roll, "miss");
        log.push(CombatEvent::new(
            attacker.side(),
            EventKind::Miss,
            format!("{} used {}, but it missed!", attacker.name(), ability.name),
        ));
        return Resolution {
            roll,
            hit: false,
            damage: 0,
            attack,
            defense,
        };
    }

    log.push(CombatEvent::new(
        attacker.side(),
        EventKind::AbilityUsed,
        format!("{} used {}!", attacker.name(), ability.name),
    ));

    let damage = compute_damage(ability.power, attack.value(), defense.value());
    defender.health_mut().damage(damage);
    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        ability = %ability.name,
        roll,
        damage,
        hp = defender.hp(),
        "hit"
    );

    log.push(CombatEvent::new(
        defender.side(),
        EventKind::Damage,
        format!("{} took {} damage.", defender.name(), damage),
    ));

    Resolution {
        roll,
        hit: true,
        damage,
        attack,
        defense,
    }
}

/// Use the item at `index` in `user`'s inventory.
///
/// Logs [`EventKind::ItemUsed`], heals by the item's heal amount (logging
/// [`EventKind::Heal`] when positive), consumes one copy, and recomputes the
/// user's stats. A negative heal amount harms the user. Returns `None`
/// without logging if there is no such item or its stack is spent.
pub fn apply_item(user: &mut Combatant, index: usize, log: &mut CombatLog) -> Option<ItemUse> {
    let item = user.inventory().get(index).filter(|i| !i.is_spent())?.clone();

    log.push(CombatEvent::new(
        user.side(),
        EventKind::ItemUsed,
        format!("{} used {}!", user.name(), item.name),
    ));

    let heal = item.heal_amount().round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
    let restored = user.health_mut().heal(heal);
    if heal > 0 {
        log.push(CombatEvent::new(
            user.side(),
            EventKind::Heal,
            format!("{} recovered {} HP.", user.name(), restored),
        ));
    }

    let remaining = user.consume_item(index).unwrap_or(0);
    debug!(user = user.name(), item = %item.name, heal, restored, remaining, "item used");

    Some(ItemUse {
        item: item.name,
        heal,
        restored,
        remaining,
    })
}

//! Turn ordering for a contested round.

use arena_core::{Ability, Stat};
use serde::Serialize;

use crate::combatant::{Combatant, Side};
use crate::config::TieBreak;

/// The order two actions resolve in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnOrder {
    /// The side that acts first.
    pub first: Side,
    /// The side that acts second, unless its action is skipped.
    pub second: Side,
    /// The player's effective speed this round.
    pub player_speed: f64,
    /// The enemy's effective speed this round.
    pub enemy_speed: f64,
}

/// `dexterity × speed_multiplier`.
pub fn effective_speed(combatant: &Combatant, ability: &Ability) -> f64 {
    combatant.final_stats().value(Stat::Dexterity) * ability.speed_multiplier
}

/// Order two speeds. Strictly faster goes first; ties go to `tie_break`.
pub fn order(player_speed: f64, enemy_speed: f64, tie_break: TieBreak) -> TurnOrder {
    let first = if player_speed > enemy_speed {
        Side::Player
    } else if enemy_speed > player_speed {
        Side::Enemy
    } else {
        tie_break.first()
    };
    TurnOrder {
        first,
        second: first.opponent(),
        player_speed,
        enemy_speed,
    }
}

/// Order the player's and enemy's chosen abilities for a round.
pub fn schedule(
    player: &Combatant,
    player_ability: &Ability,
    enemy: &Combatant,
    enemy_ability: &Ability,
    tie_break: TieBreak,
) -> TurnOrder {
    order(
        effective_speed(player, player_ability),
        effective_speed(enemy, enemy_ability),
        tie_break,
    )
}

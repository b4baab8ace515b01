//! The encounter state machine.
//!
//! A [`Battle`] owns both combatants, the round log, the configuration and
//! the random source. Each call to [`Battle::play_round`] takes the player's
//! choice, picks the enemy's action, resolves the round, drains the log, and
//! checks whether the encounter is over.
//!
//! ```text
//! Selecting --play_round--> Resolving --+--> Selecting
//!     |                                 +--> Concluded
//!     +--abandon--> Concluded
//! ```

use arena_core::{Ability, CombatantRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::chance::Chance;
use crate::combatant::{Combatant, Side};
use crate::config::BattleConfig;
use crate::error::{BattleError, BattleResult};
use crate::log::{CombatEvent, CombatLog};
use crate::resolver::{self, Resolution};
use crate::schedule::{self, TurnOrder};
use crate::stats::FinalStats;

/// The controlled side's choice for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Use the ability at this index of the player's available abilities.
    Ability(usize),
    /// Use the item at this inventory index. Takes the whole turn.
    Item(usize),
}

/// Who won a fought-out encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The enemy was reduced to 0 health.
    PlayerWin,
    /// The player was reduced to 0 health.
    EnemyWin,
}

impl Outcome {
    /// The outcome in which `side` lost.
    pub fn lost_by(side: Side) -> Self {
        match side {
            Side::Player => Self::EnemyWin,
            Side::Enemy => Self::PlayerWin,
        }
    }

    /// The signal string handed to collaborators.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlayerWin => "player_win",
            Self::EnemyWin => "enemy_win",
        }
    }
}

/// Why an encounter was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonReason {
    /// The player ran away.
    Fled,
    /// The player gave up.
    Surrendered,
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    /// Fought to the end.
    Outcome(Outcome),
    /// Left during selection, without resolution.
    Abandoned(AbandonReason),
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outcome(outcome) => f.write_str(outcome.as_str()),
            Self::Abandoned(AbandonReason::Fled) => f.write_str("fled"),
            Self::Abandoned(AbandonReason::Surrendered) => f.write_str("surrendered"),
        }
    }
}

/// Where the encounter stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    /// Waiting for the player's choice.
    Selecting,
    /// A round is being resolved.
    Resolving,
    /// Terminal. The battle cannot be resumed.
    Concluded(Conclusion),
}

/// The enemy's randomly picked action for a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyChoice {
    /// The ability picked.
    pub ability: Ability,
    /// Its index among the enemy's available abilities.
    pub index: usize,
    /// True when the enemy had no abilities and fell back to the default attack.
    pub defaulted: bool,
}

/// Health and effective stats of one combatant after a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vitals {
    /// Current health.
    pub hp: i32,
    /// Maximum health.
    pub hp_max: i32,
    /// Effective stats.
    pub final_stats: FinalStats,
}

impl Vitals {
    fn of(combatant: &Combatant) -> Self {
        Self {
            hp: combatant.hp(),
            hp_max: combatant.hp_max(),
            final_stats: combatant.final_stats().clone(),
        }
    }
}

/// Everything a collaborator needs to present one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// The round number (1-based).
    pub round: u32,
    /// What the player chose.
    pub action: PlayerAction,
    /// What the enemy picked.
    pub enemy_choice: EnemyChoice,
    /// Turn order, for ability-vs-ability rounds. `None` for item rounds.
    pub order: Option<TurnOrder>,
    /// The side whose action was skipped because it fell first.
    pub skipped: Option<Side>,
    /// Narrated events, in emission order.
    pub events: Vec<CombatEvent>,
    /// The player after the round.
    pub player: Vitals,
    /// The enemy after the round.
    pub enemy: Vitals,
    /// Set when this round ended the encounter.
    pub conclusion: Option<Conclusion>,
}

/// A validated player choice.
enum Chosen {
    Ability(Ability),
    Item(usize),
}

/// One encounter between the player and an enemy.
#[derive(Debug)]
pub struct Battle<C: Chance = StdRng> {
    player: Combatant,
    enemy: Combatant,
    log: CombatLog,
    round: u32,
    state: BattleState,
    config: BattleConfig,
    chance: C,
}

impl Battle<StdRng> {
    /// Start an encounter with an RNG seeded from `config.seed`.
    ///
    /// Both records are copied; the battle never writes back to them.
    pub fn new(player: &CombatantRecord, enemy: &CombatantRecord, config: BattleConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_chance(player, enemy, config, rng)
    }
}

impl<C: Chance> Battle<C> {
    /// Start an encounter with an explicit random source.
    pub fn with_chance(
        player: &CombatantRecord,
        enemy: &CombatantRecord,
        config: BattleConfig,
        chance: C,
    ) -> Self {
        let player = Combatant::new(Side::Player, player.clone());
        let enemy = Combatant::new(Side::Enemy, enemy.clone());
        info!(
            player = player.name(),
            enemy = enemy.name(),
            battlefield = %config.battlefield,
            "encounter started"
        );
        Self {
            player,
            enemy,
            log: CombatLog::new(),
            round: 0,
            state: BattleState::Selecting,
            config,
            chance,
        }
    }

    /// The player's combatant.
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// The enemy's combatant.
    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    /// A combatant by side.
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Current state.
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Rounds resolved so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The configuration this battle runs with.
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// The cosmetic battlefield tag.
    pub fn battlefield(&self) -> &str {
        &self.config.battlefield
    }

    /// The conclusion, once the battle is over.
    pub fn conclusion(&self) -> Option<Conclusion> {
        match self.state {
            BattleState::Concluded(c) => Some(c),
            _ => None,
        }
    }

    /// Returns true once the battle has concluded.
    pub fn is_over(&self) -> bool {
        self.conclusion().is_some()
    }

    /// Leave the encounter during selection. No round is resolved.
    pub fn abandon(&mut self, reason: AbandonReason) -> BattleResult<Conclusion> {
        if self.is_over() {
            return Err(BattleError::Concluded);
        }
        let conclusion = Conclusion::Abandoned(reason);
        self.state = BattleState::Concluded(conclusion);
        info!(round = self.round, %conclusion, "encounter abandoned");
        Ok(conclusion)
    }

    /// Resolve one round with the player's choice.
    ///
    /// An invalid choice is rejected before anything is drawn or changed.
    pub fn play_round(&mut self, action: PlayerAction) -> BattleResult<RoundReport> {
        if self.is_over() {
            return Err(BattleError::Concluded);
        }
        let chosen = self.validate(action)?;
        let enemy_choice = self.choose_enemy_action();

        self.state = BattleState::Resolving;
        self.round += 1;
        debug!(round = self.round, ?action, enemy = %enemy_choice.ability.name, "round started");

        let mut order = None;
        let mut skipped = None;
        match chosen {
            Chosen::Ability(ability) => {
                let turn = schedule::schedule(
                    &self.player,
                    &ability,
                    &self.enemy,
                    &enemy_choice.ability,
                    self.config.tie_break,
                );
                debug!(first = %turn.first, turn.player_speed, turn.enemy_speed, "turn order");

                let (first_ability, second_ability) = match turn.first {
                    Side::Player => (&ability, &enemy_choice.ability),
                    Side::Enemy => (&enemy_choice.ability, &ability),
                };
                self.strike(turn.first, first_ability);
                if self.combatant(turn.second).is_defeated() {
                    debug!(side = %turn.second, "second action skipped");
                    skipped = Some(turn.second);
                } else {
                    self.strike(turn.second, second_ability);
                }
                order = Some(turn);
            }
            Chosen::Item(index) => {
                resolver::apply_item(&mut self.player, index, &mut self.log);
                self.strike(Side::Enemy, &enemy_choice.ability);
            }
        }

        let conclusion = self.check_termination();
        self.state = match conclusion {
            Some(c) => {
                info!(round = self.round, conclusion = %c, "encounter concluded");
                BattleState::Concluded(c)
            }
            None => BattleState::Selecting,
        };

        Ok(RoundReport {
            round: self.round,
            action,
            enemy_choice,
            order,
            skipped,
            events: self.log.drain(),
            player: Vitals::of(&self.player),
            enemy: Vitals::of(&self.enemy),
            conclusion,
        })
    }

    fn validate(&self, action: PlayerAction) -> BattleResult<Chosen> {
        match action {
            PlayerAction::Ability(index) => {
                let available = self.player.available_abilities();
                available
                    .get(index)
                    .cloned()
                    .map(Chosen::Ability)
                    .ok_or(BattleError::UnknownAbility {
                        index,
                        available: available.len(),
                    })
            }
            PlayerAction::Item(index) => {
                let inventory = self.player.inventory();
                match inventory.get(index) {
                    Some(item) if item.is_spent() => Err(BattleError::EmptyItem { index }),
                    Some(_) => Ok(Chosen::Item(index)),
                    None => Err(BattleError::UnknownItem {
                        index,
                        available: inventory.len(),
                    }),
                }
            }
        }
    }

    /// Uniformly pick one of the enemy's available abilities. An
    /// out-of-range pick falls back to the first.
    fn choose_enemy_action(&mut self) -> EnemyChoice {
        let defaulted = self.enemy.abilities().is_empty();
        let available = self.enemy.available_abilities();
        let picked = self.chance.pick(available.len());
        let (index, ability) = match available.get(picked) {
            Some(ability) => (picked, ability.clone()),
            None => (
                0,
                available.first().cloned().unwrap_or_else(Ability::default_attack),
            ),
        };
        EnemyChoice {
            ability,
            index,
            defaulted,
        }
    }

    fn strike(&mut self, attacker: Side, ability: &Ability) -> Resolution {
        let (attacker, defender) = match attacker {
            Side::Player => (&self.player, &mut self.enemy),
            Side::Enemy => (&self.enemy, &mut self.player),
        };
        resolver::resolve(attacker, defender, ability, &mut self.chance, &mut self.log)
    }

    fn check_termination(&self) -> Option<Conclusion> {
        [Side::Player, Side::Enemy]
            .into_iter()
            .find(|side| self.combatant(*side).is_defeated())
            .map(|loser| Conclusion::Outcome(Outcome::lost_by(loser)))
    }
}

//! Turn-based combat resolution engine for Arena.
//!
//! Aggregates effective stats from base values and modifiers, orders each
//! round by speed, resolves abilities and items against an accuracy roll and
//! a damage formula, and drives a two-combatant encounter to its outcome.
//! All randomness flows through an injectable [`Chance`] source so encounters
//! can be replayed exactly.

pub mod battle;
pub mod chance;
pub mod combatant;
pub mod config;
pub mod error;
pub mod health;
pub mod log;
pub mod resolver;
pub mod schedule;
pub mod stats;

pub use battle::{
    AbandonReason, Battle, BattleState, Conclusion, EnemyChoice, Outcome, PlayerAction,
    RoundReport, Vitals,
};
pub use chance::{Chance, FixedRolls};
pub use combatant::{Combatant, Side};
pub use config::{BattleConfig, TieBreak};
pub use error::{BattleError, BattleResult};
pub use health::{Health, max_health};
pub use log::{CombatEvent, CombatLog, EventKind};
pub use resolver::{ItemUse, Resolution};
pub use schedule::TurnOrder;
pub use stats::{FinalStats, StatLookup, aggregate};

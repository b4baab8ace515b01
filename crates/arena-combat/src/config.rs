//! Encounter configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combatant::Side;

/// Which side acts first when both actions have the same effective speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The controlled side wins ties. It initiates every contested round.
    #[default]
    Player,
    /// The opposing side wins ties.
    Enemy,
}

impl TieBreak {
    /// The side that acts first on a tie.
    pub fn first(self) -> Side {
        match self {
            Self::Player => Side::Player,
            Self::Enemy => Side::Enemy,
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" => Ok(Self::Player),
            "enemy" => Ok(Self::Enemy),
            other => Err(format!("unknown tie-break '{other}' (expected player or enemy)")),
        }
    }
}

/// Configuration for one encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    /// RNG seed for deterministic encounters.
    pub seed: u64,
    /// Speed tie-break policy.
    pub tie_break: TieBreak,
    /// Cosmetic battlefield tag, passed through untouched.
    pub battlefield: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tie_break: TieBreak::default(),
            battlefield: "plains".to_string(),
        }
    }
}

impl BattleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the speed tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the battlefield tag.
    pub fn with_battlefield(mut self, battlefield: impl Into<String>) -> Self {
        self.battlefield = battlefield.into();
        self
    }
}

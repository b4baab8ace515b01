//! Health derivation and bounds.
//!
//! Maximum health is derived from effective stats. Current health is a
//! clamped value that never drops below 0 or rises above the maximum.

use arena_core::Stat;
use serde::Serialize;

use crate::stats::FinalStats;

/// Derive maximum health: `round(fortitude × 10 + strength × 2 + dexterity)`.
///
/// Missing stats count as 0. The result is never negative.
pub fn max_health(stats: &FinalStats) -> i32 {
    let raw = stats.value(Stat::Fortitude) * 10.0
        + stats.value(Stat::Strength) * 2.0
        + stats.value(Stat::Dexterity);
    raw.round().clamp(0.0, f64::from(i32::MAX)) as i32
}

/// Current and maximum health, clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
}

impl Health {
    /// Full health.
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// Health with a preset current value, clamped into range.
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Remove up to `amount` health. Returns how much was actually lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.adjust(-(amount.max(0)));
        before - self.current
    }

    /// Apply a signed healing amount; a negative amount harms.
    /// Returns the signed change actually applied after clamping.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.adjust(amount);
        self.current - before
    }

    /// Returns true at 0 health.
    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HP: {}/{}", self.current, self.max)
    }
}

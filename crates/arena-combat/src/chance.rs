//! Random sources for combat.
//!
//! The engine draws randomness in exactly two places: the accuracy roll and
//! the enemy's action pick. Both go through [`Chance`], so tests and replays
//! can script every draw with [`FixedRolls`].

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A source of combat randomness.
pub trait Chance {
    /// A uniform integer in `[0, 100)`.
    fn percent(&mut self) -> u32;

    /// A uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;
}

impl Chance for StdRng {
    fn percent(&mut self) -> u32 {
        self.random_range(0..100)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.random_range(0..len)
    }
}

/// A scripted random source that replays fixed values.
///
/// Percent rolls and picks are queued separately. Once a queue runs dry it
/// keeps returning 0. Out-of-range values are wrapped into range.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    percents: VecDeque<u32>,
    picks: VecDeque<usize>,
}

impl FixedRolls {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue accuracy rolls.
    pub fn with_percents(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.percents.extend(rolls);
        self
    }

    /// Queue enemy picks.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Number of queued percent rolls not yet drawn.
    pub fn remaining_percents(&self) -> usize {
        self.percents.len()
    }
}

impl Chance for FixedRolls {
    fn percent(&mut self) -> u32 {
        self.percents.pop_front().unwrap_or(0) % 100
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0) % len
    }
}

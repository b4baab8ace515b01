//! Error types for the combat engine.

/// Errors returned when driving a battle incorrectly.
///
/// Data problems never surface here; they are defaulted at ingestion or
/// during resolution. These errors only reject calls the battle cannot
/// accept in its current state.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// The battle has already concluded.
    #[error("the battle has already concluded")]
    Concluded,

    /// The chosen ability index does not exist.
    #[error("no ability #{index} (have {available})")]
    UnknownAbility {
        /// The index requested.
        index: usize,
        /// How many abilities are available.
        available: usize,
    },

    /// The chosen inventory index does not exist.
    #[error("no item #{index} (have {available})")]
    UnknownItem {
        /// The index requested.
        index: usize,
        /// How many inventory slots exist.
        available: usize,
    },

    /// The chosen inventory slot holds a spent stack.
    #[error("item #{index} has none left")]
    EmptyItem {
        /// The index requested.
        index: usize,
    },
}

/// Convenience result type for battle operations.
pub type BattleResult<T> = Result<T, BattleError>;

//! The per-round combat log.
//!
//! Events are appended while a round resolves and drained once at the end
//! of the round. Order is significant and preserved exactly.

use serde::Serialize;

use crate::combatant::Side;

/// What a combat event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An ability missed. Emitted alone.
    Miss,
    /// An ability hit. Always followed by [`EventKind::Damage`].
    AbilityUsed,
    /// Damage was dealt.
    Damage,
    /// An item was used. Followed by [`EventKind::Heal`] when it heals.
    ItemUsed,
    /// Health was restored.
    Heal,
}

/// A narrated combat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatEvent {
    /// The side the event is attributed to.
    pub side: Side,
    /// What happened.
    pub kind: EventKind,
    /// Human-readable narration.
    pub text: String,
}

impl CombatEvent {
    /// Create an event.
    pub fn new(side: Side, kind: EventKind, text: impl Into<String>) -> Self {
        Self {
            side,
            kind,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.side, self.text)
    }
}

/// Append-only event buffer for the current round.
#[derive(Debug, Default)]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Take every pending event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

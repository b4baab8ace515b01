//! Core data model for Arena: stats, modifiers, abilities, items, and combatants.
//!
//! This crate defines the records the combat engine consumes and the
//! ingestion step that turns loosely-shaped external snapshots (JSON written
//! by editors and world tools) into fully typed records. Every coercion made
//! on the way in is reported as a [`Substitution`] instead of being applied
//! silently.

/// Ability definitions and bare-key references.
pub mod ability;
/// Combatant snapshots, typed records, and the ingestion step between them.
pub mod combatant;
/// Error types used throughout the crate.
pub mod error;
/// Consumable and equippable inventory items.
pub mod item;
/// The world lexicon used to resolve bare ability keys.
pub mod lexicon;
/// Stat modifiers and modifier groups (traits).
pub mod modifier;
/// The seven attribute keys.
pub mod stat;
/// Recorded defaulting decisions made during ingestion.
pub mod substitution;
/// Explicit parse-with-default helpers for raw JSON values.
pub mod value;

/// Re-export ability types.
pub use ability::{Ability, AbilityEntry, RawAbility};
/// Re-export combatant types.
pub use combatant::{CombatantRecord, CombatantSnapshot};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{Item, RawItem};
/// Re-export the lexicon.
pub use lexicon::Lexicon;
/// Re-export modifier types.
pub use modifier::{Modifier, ModifierKind, ModifierTarget, RawModifier, RawTrait, Trait};
/// Re-export stat keys.
pub use stat::{Stat, StatKey};
/// Re-export substitution types.
pub use substitution::{Ingested, Substitution};

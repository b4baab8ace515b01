use std::fmt;

/// A defaulting decision made while ingesting external data.
///
/// Malformed or partial input never aborts ingestion. Each place where a
/// value was dropped or replaced is recorded here so callers can surface it.
#[derive(Debug, Clone, PartialEq)]
pub enum Substitution {
    /// A stat key that is not one of the seven attributes was dropped.
    UnknownStat {
        /// Where the key appeared (combatant, trait, or item name).
        context: String,
        /// The unrecognized key.
        key: String,
    },
    /// An `hp` modifier outside an item was dropped.
    HpOutsideItem {
        /// The trait that carried the modifier.
        context: String,
    },
    /// A non-numeric value was replaced with 0.
    NonNumericValue {
        /// Where the value appeared.
        context: String,
        /// The field or stat the value belonged to.
        field: String,
    },
    /// An unrecognized modifier kind was treated as additive.
    UnknownModifierKind {
        /// Where the modifier appeared.
        context: String,
        /// The unrecognized kind string.
        kind: String,
    },
    /// A bare ability key was not found in the lexicon; a zero-power
    /// placeholder was used instead.
    UnresolvedAbility {
        /// The missing key.
        key: String,
    },
    /// An ability binds to a stat key that is not one of the seven attributes.
    /// The binding is kept and always looks up as 0.
    UnknownStatBinding {
        /// The ability name.
        ability: String,
        /// The unrecognized key.
        key: String,
    },
    /// A stack quantity exceeded the item's maximum stack size.
    QuantityClamped {
        /// The item name.
        item: String,
        /// The quantity as given.
        given: u32,
        /// The maximum stack size it was clamped to.
        max_stack: u32,
    },
    /// A stackable item with quantity 0 was dropped from the inventory.
    EmptyStack {
        /// The item name.
        item: String,
    },
    /// A non-numeric optional value was ignored and left unset.
    IgnoredValue {
        /// Where the value appeared.
        context: String,
        /// The field the value belonged to.
        field: String,
    },
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStat { context, key } => {
                write!(f, "{context}: unknown stat '{key}' ignored")
            }
            Self::HpOutsideItem { context } => {
                write!(f, "{context}: 'hp' is only valid on items, ignored")
            }
            Self::NonNumericValue { context, field } => {
                write!(f, "{context}: non-numeric value for '{field}' treated as 0")
            }
            Self::UnknownModifierKind { context, kind } => {
                write!(f, "{context}: unknown modifier kind '{kind}' treated as additive")
            }
            Self::UnresolvedAbility { key } => {
                write!(f, "ability '{key}' not in lexicon, using a zero-power placeholder")
            }
            Self::UnknownStatBinding { ability, key } => {
                write!(f, "{ability}: unknown stat binding '{key}' counts as 0")
            }
            Self::QuantityClamped {
                item,
                given,
                max_stack,
            } => write!(f, "{item}: quantity {given} clamped to max stack {max_stack}"),
            Self::EmptyStack { item } => write!(f, "{item}: empty stack dropped"),
            Self::IgnoredValue { context, field } => {
                write!(f, "{context}: non-numeric value for '{field}' ignored")
            }
        }
    }
}

/// A value produced by ingestion, together with every substitution made.
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    /// The ingested value.
    pub value: T,
    /// Defaulting decisions made while producing `value`, in encounter order.
    pub substitutions: Vec<Substitution>,
}

impl<T> Ingested<T> {
    /// Returns true if the value was produced without any substitution.
    pub fn is_clean(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Discard the substitution record.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Collects substitutions during an ingestion pass.
#[derive(Debug, Default)]
pub(crate) struct Notes {
    entries: Vec<Substitution>,
}

impl Notes {
    pub(crate) fn push(&mut self, substitution: Substitution) {
        tracing::debug!(%substitution, "ingestion substitution");
        self.entries.push(substitution);
    }

    pub(crate) fn finish<T>(self, value: T) -> Ingested<T> {
        Ingested {
            value,
            substitutions: self.entries,
        }
    }
}

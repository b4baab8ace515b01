use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven fixed attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Raw physical power; the default attack binding.
    Strength,
    /// Agility; drives turn order.
    Dexterity,
    /// Bodily resilience.
    Constitution,
    /// Stamina.
    Endurance,
    /// Reasoning and arcane aptitude.
    Intelligence,
    /// Force of personality.
    Charisma,
    /// Toughness; the default defense binding and the main health driver.
    Fortitude,
}

impl Stat {
    /// All stats in canonical order.
    pub const ALL: [Stat; 7] = [
        Stat::Strength,
        Stat::Dexterity,
        Stat::Constitution,
        Stat::Endurance,
        Stat::Intelligence,
        Stat::Charisma,
        Stat::Fortitude,
    ];

    /// The lowercase key used in external data.
    pub fn key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Endurance => "endurance",
            Self::Intelligence => "intelligence",
            Self::Charisma => "charisma",
            Self::Fortitude => "fortitude",
        }
    }

    /// Parse a stat from its key, ignoring case and surrounding whitespace.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A stat binding on an ability.
///
/// External data may name a key that is not one of the seven stats. Such a
/// binding is kept as [`StatKey::Other`] and always looks up as missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    /// One of the seven fixed stats.
    Known(Stat),
    /// An unrecognized key, kept verbatim.
    Other(String),
}

impl StatKey {
    /// Parse a key, falling back to [`StatKey::Other`].
    pub fn parse(key: &str) -> Self {
        Stat::from_key(key).map_or_else(|| Self::Other(key.to_string()), Self::Known)
    }

    /// The known stat, if any.
    pub fn stat(&self) -> Option<Stat> {
        match self {
            Self::Known(stat) => Some(*stat),
            Self::Other(_) => None,
        }
    }
}

impl From<Stat> for StatKey {
    fn from(stat: Stat) -> Self {
        Self::Known(stat)
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(stat) => write!(f, "{stat}"),
            Self::Other(key) => write!(f, "{key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_key_is_case_insensitive() {
        assert_eq!(Stat::from_key("Strength"), Some(Stat::Strength));
        assert_eq!(Stat::from_key(" FORTITUDE "), Some(Stat::Fortitude));
        assert_eq!(Stat::from_key("luck"), None);
        assert_eq!(Stat::from_key("hp"), None);
    }

    #[test]
    fn keys_round_trip() {
        for stat in Stat::ALL {
            assert_eq!(Stat::from_key(stat.key()), Some(stat));
        }
    }

    #[test]
    fn stat_key_parse() {
        assert_eq!(StatKey::parse("dexterity"), StatKey::Known(Stat::Dexterity));
        assert_eq!(StatKey::parse("luck"), StatKey::Other("luck".to_string()));
        assert_eq!(StatKey::parse("luck").stat(), None);
        assert_eq!(StatKey::parse("luck").to_string(), "luck");
    }
}

//! Event priority tiers
//!
//! The host's fixed ordering labels controlling when a listener runs relative
//! to others registered for the same event. Lowercase names double as the
//! configuration keys.

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Priority tier of a listener registration, in dispatch order
#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventPriority {
    Lowest,
    Low,
    Normal,
    High,
    Highest,
    /// Runs last; intended for listeners that only observe the outcome
    Monitor,
}

impl EventPriority {
    /// All tiers in dispatch order
    pub fn values() -> impl Iterator<Item = EventPriority> {
        Self::iter()
    }

    /// Lowercase name as used in configuration keys and log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lowest => "lowest",
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Highest => "highest",
            Self::Monitor => "monitor",
        }
    }

    /// Parse a configuration key back into a tier
    pub fn parse(key: &str) -> Option<EventPriority> {
        Self::iter().find(|priority| priority.name() == key)
    }
}

impl std::fmt::Display for EventPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

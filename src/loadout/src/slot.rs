//! Attachment slot labels
//!
//! Loadout exports use the game's official slot names, while the priority
//! tables are written against internal names. A slot is lower-cased and
//! mapped through [`SLOT_ALIASES`] once, before any of its items are
//! classified.

use std::fmt;

/// Official slot name to internal slot name
pub const SLOT_ALIASES: &[(&str, &str)] = &[("hips", "belt"), ("feet", "boots")];

/// Internal slot for items from unsorted item sets
pub const UNSORTED_SLOT: &str = "back";

/// A normalized (lower-case, alias-resolved) slot label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot(String);

impl Slot {
    pub fn normalize(label: &str) -> Self {
        let lower = label.to_lowercase();
        let resolved = SLOT_ALIASES
            .iter()
            .find(|(official, _)| *official == lower)
            .map(|(_, internal)| (*internal).to_string())
            .unwrap_or(lower);
        Slot(resolved)
    }

    /// The slot unsorted items are attributed to
    pub fn unsorted() -> Self {
        Slot(UNSORTED_SLOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(Slot::normalize("hips").as_str(), "belt");
        assert_eq!(Slot::normalize("feet").as_str(), "boots");
    }

    #[test]
    fn test_case_insensitive() {
        for label in ["HIPS", "hips", "Hips", "hIpS"] {
            assert_eq!(Slot::normalize(label), Slot::normalize("belt"));
        }
    }

    #[test]
    fn test_unmapped_labels_lowercased() {
        assert_eq!(Slot::normalize("ShoulderL").as_str(), "shoulderl");
        assert_eq!(Slot::normalize("Armband").as_str(), "armband");
        assert_eq!(Slot::normalize("").as_str(), "");
    }

    #[test]
    fn test_idempotent() {
        for label in ["Hips", "Feet", "Vest", "Headgear", "Melee"] {
            let once = Slot::normalize(label);
            let twice = Slot::normalize(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_unsorted_slot() {
        assert_eq!(Slot::unsorted().as_str(), "back");
        assert_eq!(Slot::unsorted().to_string(), "back");
    }
}

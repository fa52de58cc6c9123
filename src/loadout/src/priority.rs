//! Equip priority classification
//!
//! Each flattened entry gets a two-level [`SortKey`]. The major key orders
//! slot categories (headgear first, unsorted back items near the end). The
//! minor key only matters inside the belt and vest categories, where the
//! game expects the carrier before its pouches, weapons and magazines.
//!
//! All rules are ordered tables of `(condition, key)`; the first matching
//! rule wins. Slots are already lower-case (see [`crate::slot`]), item names
//! are lower-cased before matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flatten::FlatEntry;
use crate::slot::Slot;

// ============================================================================
// Keys and conditions
// ============================================================================

/// Ordering key of one entry; compares major first, then minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SortKey {
    pub major: i32,
    pub minor: i32,
}

/// Predicate over a lower-case slot and a lower-case item name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Slot equals one of the names
    SlotIs(&'static [&'static str]),
    /// Slot contains one of the `slot` substrings, or item contains one of
    /// the `item` substrings
    SlotOrItemContains {
        slot: &'static [&'static str],
        item: &'static [&'static str],
    },
    /// Item contains one of the substrings
    ItemContains(&'static [&'static str]),
}

impl Condition {
    pub fn matches(&self, slot: &str, item: &str) -> bool {
        match self {
            Condition::SlotIs(names) => names.contains(&slot),
            Condition::SlotOrItemContains {
                slot: slot_parts,
                item: item_parts,
            } => {
                slot_parts.iter().any(|part| slot.contains(part))
                    || item_parts.iter().any(|part| item.contains(part))
            }
            Condition::ItemContains(parts) => parts.iter().any(|part| item.contains(part)),
        }
    }
}

/// A named priority rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub condition: Condition,
    pub key: i32,
}

// ============================================================================
// Major rules
// ============================================================================

/// Major key for entries no rule matches
pub const DEFAULT_MAJOR: i32 = 9;

/// Major key of the belt category
pub const BELT_MAJOR: i32 = 5;

/// Major key of the vest category
pub const VEST_MAJOR: i32 = 6;

/// Rules placed ahead of [`MAJOR_RULES`] by [`RuleSet::HandsFirst`]
pub const HANDS_FIRST_RULES: &[Rule] = &[Rule {
    name: "hands",
    condition: Condition::SlotIs(&["hands"]),
    key: -1,
}];

pub const MAJOR_RULES: &[Rule] = &[
    Rule {
        name: "headgear",
        condition: Condition::SlotOrItemContains {
            slot: &["helmet", "face", "mask", "eyewear", "headgear"],
            item: &["helmet", "nvg", "balaclava", "hat", "goggles"],
        },
        key: 0,
    },
    Rule {
        name: "left shoulder",
        condition: Condition::SlotIs(&["shoulderl"]),
        key: 1,
    },
    Rule {
        name: "right shoulder",
        condition: Condition::SlotIs(&["shoulderr"]),
        key: 2,
    },
    Rule {
        name: "gloves",
        condition: Condition::SlotIs(&["gloves"]),
        key: 3,
    },
    Rule {
        name: "boots",
        condition: Condition::SlotIs(&["boots"]),
        key: 4,
    },
    Rule {
        name: "belt",
        condition: Condition::SlotIs(&["belt"]),
        key: BELT_MAJOR,
    },
    Rule {
        name: "vest",
        condition: Condition::SlotIs(&["vest"]),
        key: VEST_MAJOR,
    },
    Rule {
        name: "clothing",
        condition: Condition::SlotIs(&["body", "legs"]),
        key: 7,
    },
    Rule {
        name: "back",
        condition: Condition::SlotIs(&["back"]),
        key: 8,
    },
];

// ============================================================================
// Minor rules
// ============================================================================

/// Minor key for belt or vest items no minor rule matches.
///
/// Minor keys are only compared within one major key, so this does not
/// relate to [`DEFAULT_MAJOR`].
pub const DEFAULT_MINOR: i32 = 9;

const SIDEARMS: &[&str] = &["glock", "colt", "pistol", "fnx", "deagle"];

pub const BELT_MINOR_RULES: &[Rule] = &[
    minor("belt", &["belt"], 0),
    minor("canteen", &["canteen"], 1),
    minor("knife sheath", &["nylonknifesheath"], 2),
    minor("knife", &["knife"], 3),
    minor("holster", &["holster"], 4),
    minor("sidearm", SIDEARMS, 5),
    minor("optic", &["optic"], 6),
    minor("magazine", &["mag_"], 7),
    minor("suppressor", &["pistolsuppressor"], 8),
];

pub const VEST_MINOR_RULES: &[Rule] = &[
    minor("plate carrier", &["platecarriervest"], 0),
    minor("pouches", &["platecarrierpouches"], 1),
    minor("flashbang", &["flashgrenade"], 2),
    minor("sidearm", SIDEARMS, 3),
    minor("optic", &["optic"], 4),
    minor("magazine", &["mag_"], 5),
    minor("suppressor", &["pistolsuppressor"], 6),
    minor("holster", &["holster"], 7),
];

const fn minor(name: &'static str, parts: &'static [&'static str], key: i32) -> Rule {
    Rule {
        name,
        condition: Condition::ItemContains(parts),
        key,
    }
}

/// Tie-break rules for a major key; empty when the category has none
pub fn minor_rules(major: i32) -> &'static [Rule] {
    match major {
        BELT_MAJOR => BELT_MINOR_RULES,
        VEST_MAJOR => VEST_MINOR_RULES,
        _ => &[],
    }
}

// ============================================================================
// Rule sets
// ============================================================================

/// Which major rule table to apply.
///
/// Older loadout tooling put anything held in the hands ahead of everything
/// else; the current table has no hands rule, so hand-held items fall to
/// [`DEFAULT_MAJOR`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSet {
    #[default]
    Standard,
    HandsFirst,
}

impl RuleSet {
    pub const ALL: &'static [RuleSet] = &[RuleSet::Standard, RuleSet::HandsFirst];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleSet::Standard => "standard",
            RuleSet::HandsFirst => "hands-first",
        }
    }

    /// Major rules in evaluation order
    pub fn major_rules(self) -> impl Iterator<Item = &'static Rule> {
        let leading: &'static [Rule] = match self {
            RuleSet::Standard => &[],
            RuleSet::HandsFirst => HANDS_FIRST_RULES,
        };
        leading.iter().chain(MAJOR_RULES)
    }

    /// Classify one item in a slot
    pub fn key_for(self, slot: &Slot, item: &str) -> SortKey {
        let slot = slot.as_str();
        let item = item.to_lowercase();

        let major = first_match(self.major_rules(), slot, &item).unwrap_or(DEFAULT_MAJOR);

        let rules = minor_rules(major);
        let minor = if rules.is_empty() {
            0
        } else {
            first_match(rules.iter(), slot, &item).unwrap_or(DEFAULT_MINOR)
        };

        SortKey { major, minor }
    }

    pub fn classify(self, entry: &FlatEntry) -> SortKey {
        self.key_for(&entry.slot, &entry.item)
    }
}

fn first_match<'a>(
    mut rules: impl Iterator<Item = &'a Rule>,
    slot: &str,
    item: &str,
) -> Option<i32> {
    rules
        .find(|rule| rule.condition.matches(slot, item))
        .map(|rule| rule.key)
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleSet::ALL
            .iter()
            .copied()
            .find(|rules| rules.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown rule set {s:?} (expected standard or hands-first)"))
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// An entry together with its computed key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub key: SortKey,
    pub entry: FlatEntry,
}

/// Classify and stable-sort entries; equal keys keep flattening order
pub fn sort_entries(entries: Vec<FlatEntry>, rules: RuleSet) -> Vec<Classified> {
    let mut classified: Vec<Classified> = entries
        .into_iter()
        .map(|entry| Classified {
            key: rules.classify(&entry),
            entry,
        })
        .collect();

    classified.sort_by_key(|c| c.key);
    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(slot: &str, item: &str) -> SortKey {
        RuleSet::Standard.key_for(&Slot::normalize(slot), item)
    }

    fn major(slot: &str, item: &str) -> i32 {
        key(slot, item).major
    }

    #[test]
    fn test_major_by_slot() {
        assert_eq!(major("ShoulderL", "M4A1"), 1);
        assert_eq!(major("ShoulderR", "Mosin9130"), 2);
        assert_eq!(major("Gloves", "TacticalGloves"), 3);
        assert_eq!(major("Feet", "CombatBoots"), 4);
        assert_eq!(major("Hips", "MilitaryBelt"), 5);
        assert_eq!(major("Vest", "PlateCarrierVest"), 6);
        assert_eq!(major("Body", "M65Jacket"), 7);
        assert_eq!(major("Legs", "CargoPants"), 7);
        assert_eq!(major("Back", "AssaultBag"), 8);
        assert_eq!(major("Melee", "Crowbar"), DEFAULT_MAJOR);
    }

    #[test]
    fn test_headgear_by_slot_or_item() {
        assert_eq!(major("Headgear", "BallisticCap"), 0);
        assert_eq!(major("Eyewear", "Sunglasses"), 0);
        assert_eq!(major("Mask", "GasMask"), 0);
        assert_eq!(major("Face", "Bandana"), 0);
        // item name wins over slot when it looks like headgear
        assert_eq!(major("Back", "NVGoggles"), 0);
        assert_eq!(major("Body", "WinterHat"), 0);
        assert_eq!(major("Vest", "Balaclava3Holes"), 0);
    }

    #[test]
    fn test_hands_rule_only_in_hands_first() {
        let hands = Slot::normalize("Hands");
        assert_eq!(RuleSet::Standard.key_for(&hands, "AKM").major, DEFAULT_MAJOR);
        assert_eq!(RuleSet::HandsFirst.key_for(&hands, "AKM").major, -1);
        // hands rule is checked before headgear
        assert_eq!(RuleSet::HandsFirst.key_for(&hands, "Helmet").major, -1);
        assert_eq!(RuleSet::Standard.key_for(&hands, "Helmet").major, 0);
    }

    #[test]
    fn test_belt_minor() {
        assert_eq!(key("hips", "TacticalBelt").minor, 0);
        assert_eq!(key("hips", "Canteen").minor, 1);
        assert_eq!(key("hips", "NylonKnifeSheath").minor, 2);
        assert_eq!(key("hips", "Knife_Hunting").minor, 3);
        assert_eq!(key("hips", "PlateCarrierHolster").minor, 4);
        assert_eq!(key("hips", "Glock19").minor, 5);
        assert_eq!(key("hips", "Deagle").minor, 5);
        assert_eq!(key("hips", "PistolOptic").minor, 5);
        assert_eq!(key("hips", "FNP45_MRDOptic").minor, 6);
        assert_eq!(key("hips", "Mag_Glock_15Rnd").minor, 5);
        assert_eq!(key("hips", "Mag_CMAG_20Rnd").minor, 7);
        assert_eq!(key("hips", "PistolSuppressor").minor, 5);
        assert_eq!(key("hips", "Rag").minor, DEFAULT_MINOR);
    }

    #[test]
    fn test_vest_minor() {
        assert_eq!(key("vest", "PlateCarrierVest").minor, 0);
        assert_eq!(key("vest", "PlateCarrierPouches").minor, 1);
        assert_eq!(key("vest", "FlashGrenade").minor, 2);
        assert_eq!(key("vest", "Glock19").minor, 3);
        assert_eq!(key("vest", "FNP45_MRDOptic").minor, 4);
        assert_eq!(key("vest", "Mag_STANAG_30Rnd").minor, 5);
        assert_eq!(key("vest", "PlateCarrierHolster").minor, 7);
        assert_eq!(key("vest", "Rag").minor, DEFAULT_MINOR);
    }

    #[test]
    fn test_minor_is_zero_outside_belt_and_vest() {
        assert_eq!(key("back", "Glock19"), SortKey { major: 8, minor: 0 });
        assert_eq!(key("melee", "TacticalBelt"), SortKey { major: 9, minor: 0 });
        assert_eq!(key("body", "Canteen").minor, 0);
    }

    #[test]
    fn test_rule_tables_in_order() {
        let keys: Vec<i32> = MAJOR_RULES.iter().map(|r| r.key).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert!(keys.iter().all(|&k| k < DEFAULT_MAJOR));

        for rules in [BELT_MINOR_RULES, VEST_MINOR_RULES] {
            let keys: Vec<i32> = rules.iter().map(|r| r.key).collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]));
            assert!(keys.iter().all(|&k| k < DEFAULT_MINOR));
        }
    }

    #[test]
    fn test_sort_key_ordering() {
        let a = SortKey { major: 5, minor: 9 };
        let b = SortKey { major: 6, minor: 0 };
        assert!(a < b);
        assert!(SortKey { major: 5, minor: 0 } < SortKey { major: 5, minor: 3 });
    }

    #[test]
    fn test_vest_example() {
        let vest = Slot::normalize("vest");
        let entries = vec![
            FlatEntry::new(vest.clone(), "Glock19"),
            FlatEntry::new(vest, "PlateCarrierVest"),
        ];
        let sorted = sort_entries(entries, RuleSet::Standard);
        assert_eq!(sorted[0].entry.item, "PlateCarrierVest");
        assert_eq!(sorted[0].key, SortKey { major: 6, minor: 0 });
        assert_eq!(sorted[1].entry.item, "Glock19");
        assert_eq!(sorted[1].key, SortKey { major: 6, minor: 3 });
    }

    #[test]
    fn test_sort_is_stable() {
        let back = Slot::unsorted();
        let entries: Vec<FlatEntry> = ["Rag", "Apple", "Rag", "Battery9V", "Apple"]
            .iter()
            .map(|item| FlatEntry::new(back.clone(), *item))
            .chain(std::iter::once(FlatEntry::new(
                Slot::normalize("gloves"),
                "WorkingGloves",
            )))
            .collect();

        let sorted = sort_entries(entries, RuleSet::Standard);
        let items: Vec<&str> = sorted.iter().map(|c| c.entry.item.as_str()).collect();
        assert_eq!(
            items,
            vec!["WorkingGloves", "Rag", "Apple", "Rag", "Battery9V", "Apple"]
        );
    }

    #[test]
    fn test_hands_first_precedes_everything() {
        let entries = vec![
            FlatEntry::new(Slot::normalize("headgear"), "BallisticHelmet"),
            FlatEntry::new(Slot::normalize("hands"), "AKM"),
            FlatEntry::new(Slot::normalize("back"), "Rag"),
        ];

        let sorted = sort_entries(entries.clone(), RuleSet::HandsFirst);
        assert_eq!(sorted[0].entry.item, "AKM");

        let sorted = sort_entries(entries, RuleSet::Standard);
        assert_eq!(sorted[0].entry.item, "BallisticHelmet");
        assert_eq!(sorted[2].entry.item, "AKM");
    }

    #[test]
    fn test_rule_set_parse() {
        assert_eq!("standard".parse::<RuleSet>(), Ok(RuleSet::Standard));
        assert_eq!("Hands-First".parse::<RuleSet>(), Ok(RuleSet::HandsFirst));
        assert!("legacy".parse::<RuleSet>().is_err());
        assert_eq!(RuleSet::HandsFirst.to_string(), "hands-first");
        assert_eq!(RuleSet::default(), RuleSet::Standard);
    }
}

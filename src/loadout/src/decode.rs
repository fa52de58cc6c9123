//! Depth-limited decoding of loadout documents
//!
//! Item trees are decoded with [`DeserializeSeed`]s that carry the current
//! nesting depth, so an over-deep tree is rejected while it is being read
//! instead of after the whole document has been built. The limit is always
//! reached before serde_json's own recursion limit (see
//! [`crate::flatten::MAX_SUPPORTED_DEPTH`]).

use std::cell::Cell;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::document::{ItemTree, SlotGroup, UnsortedGroup};

/// Records the depth at which decoding was aborted
pub(crate) struct DepthGuard {
    max_depth: usize,
    tripped: Cell<Option<usize>>,
}

impl DepthGuard {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            tripped: Cell::new(None),
        }
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Depth of the first item that exceeded the limit, if any
    pub(crate) fn tripped(&self) -> Option<usize> {
        self.tripped.get()
    }
}

/// Document fields before `name` is validated
pub(crate) struct RawDocument {
    pub name: Option<String>,
    pub slots: Vec<SlotGroup>,
    pub unsorted: Vec<UnsortedGroup>,
}

// ============================================================================
// Seeds
// ============================================================================

#[derive(Clone, Copy)]
pub(crate) struct DocumentSeed<'g> {
    pub guard: &'g DepthGuard,
}

#[derive(Clone, Copy)]
struct SlotGroupSeed<'g> {
    guard: &'g DepthGuard,
}

#[derive(Clone, Copy)]
struct ItemTreeSeed<'g> {
    guard: &'g DepthGuard,
    depth: usize,
}

/// Decodes a JSON array by applying the inner seed to every element
#[derive(Clone, Copy)]
struct ListSeed<S>(S);

impl<'de, S> DeserializeSeed<'de> for ListSeed<S>
where
    S: DeserializeSeed<'de> + Copy,
{
    type Value = Vec<S::Value>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, S> Visitor<'de> for ListSeed<S>
where
    S: DeserializeSeed<'de> + Copy,
{
    type Value = Vec<S::Value>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element_seed(self.0)? {
            values.push(value);
        }
        Ok(values)
    }
}

fn missing<'de, A: MapAccess<'de>>(field: &'static str) -> A::Error {
    de::Error::missing_field(field)
}

// ============================================================================
// Document
// ============================================================================

impl<'de> DeserializeSeed<'de> for DocumentSeed<'_> {
    type Value = RawDocument;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for DocumentSeed<'_> {
    type Value = RawDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a loadout object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut name = None;
        let mut slots = None;
        let mut unsorted = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => name = Some(map.next_value::<String>()?),
                "attachmentSlotItemSets" => {
                    let seed = ListSeed(SlotGroupSeed { guard: self.guard });
                    slots = Some(map.next_value_seed(seed)?);
                }
                "discreteUnsortedItemSets" => {
                    unsorted = Some(map.next_value::<Vec<UnsortedGroup>>()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(RawDocument {
            name,
            slots: slots.unwrap_or_default(),
            unsorted: unsorted.unwrap_or_default(),
        })
    }
}

// ============================================================================
// Slot groups and item trees
// ============================================================================

impl<'de> DeserializeSeed<'de> for SlotGroupSeed<'_> {
    type Value = SlotGroup;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for SlotGroupSeed<'_> {
    type Value = SlotGroup;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a slot item set object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut slot_name = None;
        let mut item_sets = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "slotName" => slot_name = Some(map.next_value::<String>()?),
                "discreteItemSets" => {
                    let seed = ListSeed(ItemTreeSeed {
                        guard: self.guard,
                        depth: 1,
                    });
                    item_sets = Some(map.next_value_seed(seed)?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(SlotGroup {
            slot_name: slot_name.ok_or_else(|| missing::<A>("slotName"))?,
            discrete_item_sets: item_sets.ok_or_else(|| missing::<A>("discreteItemSets"))?,
        })
    }
}

impl<'de> DeserializeSeed<'de> for ItemTreeSeed<'_> {
    type Value = ItemTree;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        if self.depth > self.guard.max_depth {
            if self.guard.tripped.get().is_none() {
                self.guard.tripped.set(Some(self.depth));
            }
            return Err(de::Error::custom(format_args!(
                "item tree nesting exceeds maximum depth of {}",
                self.guard.max_depth
            )));
        }
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for ItemTreeSeed<'_> {
    type Value = ItemTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an item set object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut item_type = None;
        let mut simple = None;
        let mut complex = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "itemType" => item_type = Some(map.next_value::<String>()?),
                "simpleChildrenTypes" => simple = Some(map.next_value::<Vec<String>>()?),
                "complexChildrenTypes" => {
                    let seed = ListSeed(ItemTreeSeed {
                        guard: self.guard,
                        depth: self.depth + 1,
                    });
                    complex = Some(map.next_value_seed(seed)?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ItemTree {
            item_type: item_type.ok_or_else(|| missing::<A>("itemType"))?,
            simple_children_types: simple.unwrap_or_default(),
            complex_children_types: complex.unwrap_or_default(),
        })
    }
}

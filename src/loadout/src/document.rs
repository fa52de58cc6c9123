//! Loadout document model
//!
//! The JSON layout mirrors the game's loadout export: a named loadout with
//! per-slot item sets and a list of unsorted item sets. Only the fields the
//! converter needs are decoded; everything else in the export is ignored.

use serde::de::DeserializeSeed;
use serde::Deserialize;
use serde_json::Value;

use crate::decode::{DepthGuard, DocumentSeed, RawDocument};
use crate::error::{ConvertError, Result};
use crate::flatten::DEFAULT_MAX_DEPTH;

/// Root of a loadout export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadoutDocument {
    pub name: String,
    pub slots: Vec<SlotGroup>,
    pub unsorted: Vec<UnsortedGroup>,
}

/// Items declared for one attachment slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotGroup {
    pub slot_name: String,
    pub discrete_item_sets: Vec<ItemTree>,
}

/// An item together with the attachments it carries.
///
/// Simple children are plain item names; complex children are full item
/// trees that may carry attachments of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemTree {
    pub item_type: String,
    pub simple_children_types: Vec<String>,
    pub complex_children_types: Vec<ItemTree>,
}

/// Items that are not bound to a slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsortedGroup {
    #[serde(default)]
    pub simple_children_types: Vec<String>,
}

impl LoadoutDocument {
    /// Parse a loadout from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_slice_limited(bytes, DEFAULT_MAX_DEPTH)
    }

    /// Parse a loadout, rejecting item trees nested deeper than `max_depth`
    pub fn from_slice_limited(bytes: &[u8], max_depth: usize) -> Result<Self> {
        let start = bytes.iter().position(|b| !b.is_ascii_whitespace());
        let Some(start) = start else {
            return Err(ConvertError::EmptyInput);
        };

        if bytes[start] != b'{' {
            let value: Value = serde_json::from_slice(bytes).map_err(ConvertError::Json)?;
            return Err(ConvertError::NotAnObject(json_type_name(&value)));
        }

        let guard = DepthGuard::new(max_depth);
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let raw = DocumentSeed { guard: &guard }
            .deserialize(&mut deserializer)
            .and_then(|raw| deserializer.end().map(|()| raw))
            .map_err(|e| decode_error(e, &guard))?;

        Self::validate(raw)
    }

    /// Decode a loadout from an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_limited(value, DEFAULT_MAX_DEPTH)
    }

    pub fn from_value_limited(value: &Value, max_depth: usize) -> Result<Self> {
        if !value.is_object() {
            return Err(ConvertError::NotAnObject(json_type_name(value)));
        }

        let guard = DepthGuard::new(max_depth);
        let raw = DocumentSeed { guard: &guard }
            .deserialize(value)
            .map_err(|e| decode_error(e, &guard))?;

        Self::validate(raw)
    }

    fn validate(raw: RawDocument) -> Result<Self> {
        let name = raw.name.ok_or(ConvertError::MissingField("name"))?;
        if name.is_empty() {
            return Err(ConvertError::EmptyField("name"));
        }

        Ok(Self {
            name,
            slots: raw.slots,
            unsorted: raw.unsorted,
        })
    }

    /// Total number of item occurrences, counting every tree node, every
    /// simple child and every unsorted name
    pub fn item_count(&self) -> usize {
        let slotted: usize = self
            .slots
            .iter()
            .flat_map(|group| &group.discrete_item_sets)
            .map(ItemTree::item_count)
            .sum();
        let unsorted: usize = self
            .unsorted
            .iter()
            .map(|group| group.simple_children_types.len())
            .sum();
        slotted + unsorted
    }
}

impl ItemTree {
    /// Leaf item with no attachments
    pub fn leaf(item_type: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            ..Default::default()
        }
    }

    fn item_count(&self) -> usize {
        1 + self.simple_children_types.len()
            + self
                .complex_children_types
                .iter()
                .map(ItemTree::item_count)
                .sum::<usize>()
    }
}

/// Sort a decoder failure into the depth guard, bad syntax, or bad shape
fn decode_error(error: serde_json::Error, guard: &DepthGuard) -> ConvertError {
    if let Some(depth) = guard.tripped() {
        return ConvertError::TooDeep {
            depth,
            max_depth: guard.max_depth(),
        };
    }

    if error.is_data() {
        ConvertError::Schema(error)
    } else {
        ConvertError::Json(error)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

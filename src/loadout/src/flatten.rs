//! Item tree flattening
//!
//! Turns the nested item sets of a loadout into one flat list of
//! (slot, item) entries. Within a tree the parent comes first, then its
//! simple children, then each complex child expanded depth first. Nested
//! attachments keep the slot of the group their root was declared in.

use crate::document::{ItemTree, LoadoutDocument};
use crate::error::{ConvertError, Result};
use crate::slot::Slot;

/// Deepest item tree accepted by default; a root item is depth 1
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Highest usable depth limit.
///
/// Every item level costs two JSON nesting levels (the item object and its
/// `complexChildrenTypes` array) on top of the four around a root item, and
/// serde_json stops at 128. A limit of 60 is still caught by the item
/// decoder with room to spare.
pub const MAX_SUPPORTED_DEPTH: usize = 60;

/// One item occurrence attributed to a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub slot: Slot,
    pub item: String,
}

impl FlatEntry {
    pub fn new(slot: Slot, item: impl Into<String>) -> Self {
        Self {
            slot,
            item: item.into(),
        }
    }
}

/// Flatten every slot group, then every unsorted group, in declaration order
pub fn flatten(document: &LoadoutDocument, max_depth: usize) -> Result<Vec<FlatEntry>> {
    let mut entries = Vec::new();

    for group in &document.slots {
        let slot = Slot::normalize(&group.slot_name);
        tracing::trace!(label = %group.slot_name, slot = %slot, "normalized slot");

        for tree in &group.discrete_item_sets {
            flatten_tree(tree, &slot, 1, max_depth, &mut entries)?;
        }
    }

    let unsorted = Slot::unsorted();
    for group in &document.unsorted {
        for item in &group.simple_children_types {
            entries.push(FlatEntry::new(unsorted.clone(), item.as_str()));
        }
    }

    tracing::debug!(
        loadout = %document.name,
        entries = entries.len(),
        "flattened item sets"
    );
    Ok(entries)
}

fn flatten_tree(
    tree: &ItemTree,
    slot: &Slot,
    depth: usize,
    max_depth: usize,
    entries: &mut Vec<FlatEntry>,
) -> Result<()> {
    if depth > max_depth {
        return Err(ConvertError::TooDeep { depth, max_depth });
    }

    entries.push(FlatEntry::new(slot.clone(), tree.item_type.as_str()));
    for child in &tree.simple_children_types {
        entries.push(FlatEntry::new(slot.clone(), child.as_str()));
    }
    for child in &tree.complex_children_types {
        flatten_tree(child, slot, depth + 1, max_depth, entries)?;
    }

    Ok(())
}

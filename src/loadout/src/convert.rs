//! Conversion pipeline: decode, flatten, classify, sort, serialize

use serde_json::Value;

use crate::document::LoadoutDocument;
use crate::error::Result;
use crate::flatten::{flatten, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
use crate::priority::{sort_entries, Classified, RuleSet};
use crate::xml::write_type;

/// Per-conversion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub rules: RuleSet,
    /// Deepest item tree accepted; deeper trees fail the conversion.
    /// Values above [`MAX_SUPPORTED_DEPTH`] are clamped to it.
    pub max_depth: usize,
}

impl ConvertOptions {
    /// The depth limit actually enforced
    pub fn depth_limit(&self) -> usize {
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            tracing::warn!(
                requested = self.max_depth,
                limit = MAX_SUPPORTED_DEPTH,
                "clamping item nesting limit"
            );
        }
        self.max_depth.min(MAX_SUPPORTED_DEPTH)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A loadout resolved into its final equip order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub name: String,
    pub entries: Vec<Classified>,
}

impl Conversion {
    pub fn plan(document: &LoadoutDocument, options: &ConvertOptions) -> Result<Self> {
        let flat = flatten(document, options.depth_limit())?;
        let entries = sort_entries(flat, options.rules);

        if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
            tracing::debug!(
                loadout = %document.name,
                rules = %options.rules,
                first = %first.entry.item,
                last = %last.entry.item,
                "ordered attachments"
            );
        }

        Ok(Self {
            name: document.name.clone(),
            entries,
        })
    }

    pub fn to_xml(&self) -> Result<String> {
        write_type(&self.name, self.entries.iter().map(|c| &c.entry))
    }
}

pub fn convert_document(document: &LoadoutDocument, options: &ConvertOptions) -> Result<String> {
    Conversion::plan(document, options)?.to_xml()
}

pub fn convert_value(value: &Value, options: &ConvertOptions) -> Result<String> {
    let document = LoadoutDocument::from_value_limited(value, options.depth_limit())?;
    convert_document(&document, options)
}

/// Convert raw JSON bytes into equipment-type XML
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> Result<String> {
    let document = LoadoutDocument::from_slice_limited(bytes, options.depth_limit())?;
    convert_document(&document, options)
}

//! # loadout
//!
//! Converts loadout exports (nested JSON item sets per attachment slot) into
//! equipment-type XML with one `<attachments>` block per item, in the order
//! the game equips them.
//!
//! The conversion runs in four steps:
//! - normalize slot labels ([`slot`])
//! - flatten nested item trees into (slot, item) entries ([`flatten`])
//! - classify and stable-sort entries by equip priority ([`priority`])
//! - write the sorted entries as XML ([`xml`])
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = br#"{
//!     "name": "Test",
//!     "attachmentSlotItemSets": [{
//!         "slotName": "hips",
//!         "discreteItemSets": [{
//!             "itemType": "TacticalBelt",
//!             "simpleChildrenTypes": ["Knife_Hunting"]
//!         }]
//!     }]
//! }"#;
//!
//! let xml = loadout::convert_bytes(json, &loadout::ConvertOptions::default())?;
//! assert!(xml.contains(r#"<item name="TacticalBelt" chance="1.00"/>"#));
//! # Ok(())
//! # }
//! ```

pub mod convert;
mod decode;
pub mod document;
pub mod error;
pub mod flatten;
pub mod priority;
pub mod slot;
pub mod xml;

#[doc(inline)]
pub use convert::{convert_bytes, convert_document, convert_value, ConvertOptions, Conversion};
#[doc(inline)]
pub use document::{ItemTree, LoadoutDocument, SlotGroup, UnsortedGroup};
#[doc(inline)]
pub use error::{ConvertError, ErrorKind};
#[doc(inline)]
pub use flatten::{FlatEntry, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
#[doc(inline)]
pub use priority::{Classified, RuleSet, SortKey};
#[doc(inline)]
pub use slot::Slot;

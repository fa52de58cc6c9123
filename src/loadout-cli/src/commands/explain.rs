//! Explain command handler
//!
//! Prints the equip order the converter would write, with the sort key of
//! every entry, so unexpected orderings can be traced back to a rule.

use anyhow::{Context, Result};
use loadout::{ConvertOptions, Conversion, LoadoutDocument};
use std::fmt::Write;
use std::path::Path;

use crate::file_utils::read_input;

pub fn handle(input: &Path, options: &ConvertOptions) -> Result<()> {
    let bytes = read_input(input)?;
    let document = LoadoutDocument::from_slice_limited(&bytes, options.depth_limit())
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    let conversion = Conversion::plan(&document, options)
        .with_context(|| format!("Failed to order items in {}", input.display()))?;

    print!("{}", render(&conversion, options));
    Ok(())
}

fn render(conversion: &Conversion, options: &ConvertOptions) -> String {
    let slot_width = conversion
        .entries
        .iter()
        .map(|c| c.entry.slot.as_str().len())
        .max()
        .unwrap_or(0)
        .max("SLOT".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} items, {} rules)",
        conversion.name,
        conversion.entries.len(),
        options.rules
    );
    let _ = writeln!(out, "MAJOR MINOR  {:<slot_width$}  ITEM", "SLOT");

    for classified in &conversion.entries {
        let _ = writeln!(
            out,
            "{:>5} {:>5}  {:<slot_width$}  {}",
            classified.key.major,
            classified.key.minor,
            classified.entry.slot,
            classified.entry.item
        );
    }

    out
}

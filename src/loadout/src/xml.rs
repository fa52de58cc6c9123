//! Equipment-type XML output
//!
//! Produces the layout the asset pipeline reads: a `<type>` root holding
//! one `<attachments>` block per item, in equip order.
//!
//! ```text
//! <?xml version="1.0" ?>
//! <type name="Sniper">
//!     <attachments chance="1">
//!         <item name="TacticalBelt" chance="1.00"/>
//!     </attachments>
//! </type>
//! ```

use std::borrow::Cow;
use std::io;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use crate::error::{ConvertError, Result};
use crate::flatten::FlatEntry;

const INDENT_WIDTH: usize = 4;

/// Chance attribute of each `<attachments>` block
pub const BLOCK_CHANCE: &str = "1";

/// Chance attribute of each `<item>`
pub const ITEM_CHANCE: &str = "1.00";

/// Escape an attribute value.
///
/// Quotes are always double, so apostrophes are left as they are. Tabs and
/// line breaks become character references so they survive attribute
/// normalization when read back.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\t', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Characters XML 1.0 cannot carry at all, escaped or not
fn is_forbidden(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

fn check_characters(value: &str, field: impl FnOnce() -> String) -> Result<()> {
    match value.chars().find(|&c| is_forbidden(c)) {
        Some(codepoint) => Err(ConvertError::InvalidCharacter {
            field: field(),
            codepoint,
        }),
        None => Ok(()),
    }
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &(key, value) in attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_owned().into_bytes()),
        });
    }
    start
}

/// Serialize sorted entries under a `<type>` root named after the loadout.
///
/// Names holding characters XML cannot represent are rejected before
/// anything is written.
pub fn write_type<'a>(
    name: &str,
    entries: impl IntoIterator<Item = &'a FlatEntry>,
) -> Result<String> {
    check_characters(name, || "loadout name".to_string())?;
    let entries: Vec<&FlatEntry> = entries.into_iter().collect();
    for (index, entry) in entries.iter().enumerate() {
        check_characters(&entry.item, || {
            format!("item #{} in slot '{}'", index + 1, entry.slot)
        })?;
    }

    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', INDENT_WIDTH);

    // Spelled out so the declaration keeps the space before `?>`
    let declaration = BytesStart::from_content("xml version=\"1.0\" ", 3);
    writer.write_event(Event::Decl(BytesDecl::from_start(declaration)))?;

    let root = element("type", &[("name", name)]);
    if entries.is_empty() {
        writer.write_event(Event::Empty(root))?;
    } else {
        writer.write_event(Event::Start(root))?;

        for entry in &entries {
            let block = element("attachments", &[("chance", BLOCK_CHANCE)]);
            writer.write_event(Event::Start(block))?;
            writer.write_event(Event::Empty(element(
                "item",
                &[("name", entry.item.as_str()), ("chance", ITEM_CHANCE)],
            )))?;
            writer.write_event(Event::End(BytesEnd::new("attachments")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("type")))?;
        tracing::debug!(loadout = name, items = entries.len(), "wrote equipment type");
    }

    let mut xml =
        String::from_utf8(output).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Slot;

    fn entries(items: &[&str]) -> Vec<FlatEntry> {
        items
            .iter()
            .map(|item| FlatEntry::new(Slot::unsorted(), *item))
            .collect()
    }

    #[test]
    fn test_layout() {
        let xml = write_type("Sniper", &entries(&["TacticalBelt", "Knife_Hunting"])).unwrap();
        let expected = concat!(
            "<?xml version=\"1.0\" ?>\n",
            "<type name=\"Sniper\">\n",
            "    <attachments chance=\"1\">\n",
            "        <item name=\"TacticalBelt\" chance=\"1.00\"/>\n",
            "    </attachments>\n",
            "    <attachments chance=\"1\">\n",
            "        <item name=\"Knife_Hunting\" chance=\"1.00\"/>\n",
            "    </attachments>\n",
            "</type>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_empty_root_is_self_closing() {
        let xml = write_type("Nothing", &entries(&[])).unwrap();
        assert_eq!(xml, "<?xml version=\"1.0\" ?>\n<type name=\"Nothing\"/>\n");
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(escape_attribute("Plain_Item"), "Plain_Item");
        assert!(matches!(escape_attribute("Plain_Item"), Cow::Borrowed(_)));
        assert_eq!(
            escape_attribute(r#"A&B <"C"> D's"#),
            "A&amp;B &lt;&quot;C&quot;&gt; D's"
        );
        assert_eq!(escape_attribute("a\tb\nc\r"), "a&#9;b&#10;c&#13;");
    }

    #[test]
    fn test_escaped_names_in_output() {
        let xml = write_type("Q&A \"Kit\"", &entries(&["<Odd>"])).unwrap();
        assert!(xml.contains("<type name=\"Q&amp;A &quot;Kit&quot;\">"));
        assert!(xml.contains("<item name=\"&lt;Odd&gt;\" chance=\"1.00\"/>"));
    }

    #[test]
    fn test_duplicates_kept() {
        let xml = write_type("Dupes", &entries(&["Rag", "Rag", "Rag"])).unwrap();
        assert_eq!(xml.matches("<item name=\"Rag\"").count(), 3);
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = write_type("Kit", &entries(&["Canteen", "Rag\u{1}"])).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvalidCharacter { codepoint: '\u{1}', ref field } if field.starts_with("item #2")
        ));

        let err = write_type("Bad\u{fffe}", &entries(&["Rag"])).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidCharacter { codepoint: '\u{fffe}', .. }));

        assert!(write_type("Tabs\tok", &entries(&["Line\nbreak"])).is_ok());
    }
}

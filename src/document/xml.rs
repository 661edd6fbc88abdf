//! Small helpers over quick-xml events

use quick_xml::events::BytesStart;

/// WordprocessingML `w:val`-style attribute lookup by local name
pub(crate) fn attribute(element: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.local_name().as_ref() == local {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// OOXML boolean attribute (`1`, `true`, `on`)
pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "on")
}

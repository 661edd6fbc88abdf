//! Module headings and name sanitization

use crate::document::Paragraph;
use crate::error::Result;
use crate::progress::BuildObserver;
use serde::Serialize;

/// Style name prefix that marks a paragraph as a module heading
pub const HEADING_STYLE_PREFIX: &str = "Heading 1";

/// Replacement for characters that are not filesystem-safe
const REPLACEMENT: char = '_';

/// Whether `c` may appear in a module directory name
fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-')
}

/// Replace every character outside `[A-Za-z0-9 _-]` with `_`.
///
/// The result has the same number of characters as the input, and
/// sanitizing an already sanitized name returns it unchanged.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_safe_char(c) { c } else { REPLACEMENT })
        .collect()
}

/// A top-level section heading of the syllabus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading text with surrounding whitespace removed
    pub raw: String,
    /// Filesystem-safe module name
    pub sanitized: String,
}

impl Heading {
    /// Build a heading from paragraph text; blank text yields `None`
    pub fn new(text: &str) -> Option<Self> {
        let raw = text.trim();
        if raw.is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            sanitized: sanitize_name(raw),
        })
    }
}

/// Collect module headings from a paragraph sequence in document order.
///
/// A paragraph is a heading when its style name starts with `prefix`.
/// Blank headings are dropped; repeated headings are kept. The first
/// read error stops the scan and is returned.
pub fn extract_headings<I>(
    paragraphs: I,
    prefix: &str,
    observer: &dyn BuildObserver,
) -> Result<Vec<Heading>>
where
    I: IntoIterator<Item = Result<Paragraph>>,
{
    let mut headings = Vec::new();

    for paragraph in paragraphs {
        let paragraph = paragraph?;
        if !paragraph.has_style_prefix(prefix) {
            continue;
        }

        match Heading::new(&paragraph.text) {
            Some(heading) => {
                observer.on_heading(headings.len(), &heading);
                headings.push(heading);
            }
            None => observer.on_skipped_heading(paragraph.style.as_deref().unwrap_or(prefix)),
        }
    }

    observer.on_headings_collected(headings.len());
    Ok(headings)
}

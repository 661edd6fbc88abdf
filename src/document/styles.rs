//! Style part (`word/styles.xml`) parsing
//!
//! Paragraphs reference styles by id (`Heading1`); the style part maps
//! ids to display names (`heading 1`). Built-in names are stored in
//! lowercase and shown to users capitalized, so they are translated to
//! their UI form before any prefix matching happens.

use super::xml::{attribute, is_truthy};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Built-in style names that Word stores lowercase
const BUILTIN_UI_NAMES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
];

/// Translate a stored style name to the name users see
pub fn ui_name(name: &str) -> &str {
    BUILTIN_UI_NAMES
        .iter()
        .find(|(internal, _)| *internal == name)
        .map(|(_, ui)| *ui)
        .unwrap_or(name)
}

/// Kind of a style definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl StyleKind {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("character") => Self::Character,
            Some("table") => Self::Table,
            Some("numbering") => Self::Numbering,
            // w:type defaults to paragraph when omitted
            _ => Self::Paragraph,
        }
    }
}

/// One style definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Style id referenced from paragraphs
    pub id: String,
    /// Display name (already translated to UI form)
    pub name: Option<String>,
    /// Style kind
    pub kind: StyleKind,
    /// Marked as the default for its kind
    pub is_default: bool,
}

/// Style definitions of one document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, Style>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Parse the XML of a style part
    pub fn parse(xml: &[u8]) -> Result<Self, String> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut sheet = StyleSheet::default();
        let mut current: Option<Style> = None;

        loop {
            match reader.read_event_into(&mut buf).map_err(|e| e.to_string())? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"style" => current = Some(start_style(&e)?),
                    b"name" => set_name(&mut current, &e)?,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"style" => sheet.insert(start_style(&e)?),
                    b"name" => set_name(&mut current, &e)?,
                    _ => {}
                },
                Event::End(e) if e.local_name().as_ref() == b"style" => {
                    if let Some(style) = current.take() {
                        sheet.insert(style);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    fn insert(&mut self, style: Style) {
        if style.kind == StyleKind::Paragraph && style.is_default {
            self.default_paragraph = Some(style.id.clone());
        }
        self.styles.insert(style.id.clone(), style);
    }

    /// Number of style definitions
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no styles were defined
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Look up a style by id
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// The default paragraph style, if the document declares one
    pub fn default_paragraph_style(&self) -> Option<&Style> {
        self.default_paragraph
            .as_deref()
            .and_then(|id| self.styles.get(id))
    }

    /// Resolve the display name of a paragraph's style.
    ///
    /// A missing or unknown id (or an id naming a non-paragraph style)
    /// falls back to the default paragraph style. Without any style
    /// definitions the raw id is returned.
    pub fn paragraph_style_name(&self, style_id: Option<&str>) -> Option<String> {
        if self.is_empty() {
            return style_id.map(str::to_owned);
        }

        style_id
            .and_then(|id| self.styles.get(id))
            .filter(|style| style.kind == StyleKind::Paragraph)
            .or_else(|| self.default_paragraph_style())
            .and_then(|style| style.name.clone())
    }
}

fn start_style(element: &BytesStart<'_>) -> Result<Style, String> {
    let id = attribute(element, b"styleId")?.unwrap_or_default();
    let kind = StyleKind::parse(attribute(element, b"type")?.as_deref());
    let is_default = attribute(element, b"default")?
        .map(|v| is_truthy(&v))
        .unwrap_or(false);

    Ok(Style {
        id,
        name: None,
        kind,
        is_default,
    })
}

fn set_name(current: &mut Option<Style>, element: &BytesStart<'_>) -> Result<(), String> {
    if let Some(style) = current.as_mut() {
        if let Some(name) = attribute(element, b"val")? {
            style.name = Some(ui_name(&name).to_string());
        }
    }
    Ok(())
}

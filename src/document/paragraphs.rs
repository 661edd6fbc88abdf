//! Lazy paragraph iteration over the main document part
//!
//! Only direct `w:p` children of `w:body` are yielded, in document order.
//! Paragraphs nested in tables, text boxes or other containers are
//! skipped. Text is the concatenation of run text: tabs become `\t`,
//! line breaks `\n` and non-breaking hyphens `-`. Page and column breaks
//! contribute nothing.

use super::model::Paragraph;
use super::styles::StyleSheet;
use super::xml::attribute;
use crate::error::{Result, SyllabusError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Cursor;
use std::path::PathBuf;

/// Paragraph being assembled
#[derive(Default)]
struct PendingParagraph {
    /// Stack depth of the `w:p` element itself
    depth: usize,
    text: String,
    style_id: Option<String>,
}

/// Single-pass iterator over the body paragraphs of a document.
///
/// Each item is a `Result`; after the first error the iterator is
/// exhausted.
pub struct Paragraphs {
    path: PathBuf,
    reader: Reader<Cursor<Vec<u8>>>,
    styles: StyleSheet,
    buf: Vec<u8>,
    stack: Vec<Vec<u8>>,
    pending: Option<PendingParagraph>,
    saw_body: bool,
    done: bool,
}

impl Paragraphs {
    pub(crate) fn new(path: PathBuf, document_xml: Vec<u8>, styles: StyleSheet) -> Self {
        Self {
            path,
            reader: Reader::from_reader(Cursor::new(document_xml)),
            styles,
            buf: Vec::new(),
            stack: Vec::new(),
            pending: None,
            saw_body: false,
            done: false,
        }
    }

    fn fail(&mut self, message: impl Into<String>) -> Option<Result<Paragraph>> {
        self.done = true;
        Some(Err(SyllabusError::document(&self.path, message)))
    }

    /// Whether the open element stack is exactly `document > body`
    fn at_body_level(&self) -> bool {
        self.stack.len() == 2 && self.stack[0] == b"document" && self.stack[1] == b"body"
    }

    /// Element names between the pending paragraph and the current position
    fn inside_paragraph(&self) -> Option<&[Vec<u8>]> {
        self.pending
            .as_ref()
            .map(|p| self.stack.get(p.depth..).unwrap_or(&[]))
    }

    /// Whether the innermost open element is a run directly in the paragraph
    fn in_run(&self) -> bool {
        match self.inside_paragraph() {
            Some([run]) => run == b"r",
            Some([link, run]) => link == b"hyperlink" && run == b"r",
            _ => false,
        }
    }

    fn in_run_text(&self) -> bool {
        match self.inside_paragraph() {
            Some([run, t]) => run == b"r" && t == b"t",
            Some([link, run, t]) => link == b"hyperlink" && run == b"r" && t == b"t",
            _ => false,
        }
    }

    /// Handle an opening (or self-closing) element
    fn open(&mut self, element: &BytesStart<'_>) -> std::result::Result<(), String> {
        let name = element.local_name().as_ref().to_vec();

        if self.pending.is_none() {
            if name == b"body" && self.stack.len() == 1 && self.stack[0] == b"document" {
                self.saw_body = true;
            }
            if name == b"p" && self.at_body_level() {
                self.pending = Some(PendingParagraph {
                    depth: self.stack.len() + 1,
                    ..Default::default()
                });
            }
            return Ok(());
        }

        let in_run = self.in_run();
        let is_style = matches!(self.inside_paragraph(), Some([ppr]) if ppr == b"pPr")
            && name == b"pStyle";

        if let Some(pending) = self.pending.as_mut() {
            if is_style {
                pending.style_id = attribute(element, b"val")?;
            } else if in_run {
                match name.as_slice() {
                    b"tab" | b"ptab" => pending.text.push('\t'),
                    b"noBreakHyphen" => pending.text.push('-'),
                    b"cr" => pending.text.push('\n'),
                    b"br" => {
                        let kind = attribute(element, b"type")?;
                        if matches!(kind.as_deref(), None | Some("textWrapping")) {
                            pending.text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Close the innermost element, returning a finished paragraph
    fn close(&mut self) -> Option<Paragraph> {
        self.stack.pop();
        let finished = self
            .pending
            .as_ref()
            .map(|p| self.stack.len() < p.depth)
            .unwrap_or(false);

        if !finished {
            return None;
        }

        self.pending.take().map(|p| Paragraph {
            style: self.styles.paragraph_style_name(p.style_id.as_deref()),
            text: p.text,
        })
    }
}

impl Iterator for Paragraphs {
    type Item = Result<Paragraph>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_event_into(&mut self.buf)
                .map(|event| event.into_owned());
            let event = match read {
                Ok(event) => event,
                Err(e) => {
                    let position = self.reader.buffer_position();
                    return self.fail(format!("malformed XML at byte {}: {}", position, e));
                }
            };

            match event {
                Event::Start(e) => {
                    if let Err(message) = self.open(&e) {
                        return self.fail(message);
                    }
                    self.stack.push(e.local_name().as_ref().to_vec());
                }
                Event::Empty(e) => {
                    if let Err(message) = self.open(&e) {
                        return self.fail(message);
                    }
                    self.stack.push(e.local_name().as_ref().to_vec());
                    if let Some(paragraph) = self.close() {
                        return Some(Ok(paragraph));
                    }
                }
                Event::End(_) => {
                    if let Some(paragraph) = self.close() {
                        return Some(Ok(paragraph));
                    }
                }
                Event::Text(t) if self.in_run_text() => match t.unescape() {
                    Ok(text) => {
                        if let Some(pending) = self.pending.as_mut() {
                            pending.text.push_str(&text);
                        }
                    }
                    Err(e) => return self.fail(format!("invalid text content: {}", e)),
                },
                Event::CData(c) if self.in_run_text() => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    if let Some(pending) = self.pending.as_mut() {
                        pending.text.push_str(&text);
                    }
                }
                Event::Eof => {
                    self.done = true;
                    if !self.saw_body {
                        return self.fail("document part has no w:body element");
                    }
                    if self.pending.is_some() || !self.stack.is_empty() {
                        return self.fail("document part ended before all elements were closed");
                    }
                    return None;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(body: &str) -> Vec<Result<Paragraph>> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        Paragraphs::new(PathBuf::from("test.docx"), xml.into_bytes(), StyleSheet::default()).collect()
    }

    fn ok(body: &str) -> Vec<Paragraph> {
        paragraphs(body).into_iter().map(|p| p.unwrap()).collect()
    }

    #[test]
    fn test_page_and_column_breaks_add_nothing() {
        let result = ok(concat!(
            r#"<w:p><w:r><w:br w:type="page"/><w:t>Paging</w:t>"#,
            r#"<w:br w:type="column"/><w:t> Basics</w:t></w:r></w:p>"#
        ));
        assert_eq!(result, vec![Paragraph::plain("Paging Basics")]);
    }

    #[test]
    fn test_text_wrapping_break_is_newline() {
        let result = ok(r#"<w:p><w:r><w:t>a</w:t><w:br w:type="textWrapping"/><w:t>b</w:t></w:r></w:p>"#);
        assert_eq!(result, vec![Paragraph::plain("a\nb")]);
    }

    #[test]
    fn test_non_breaking_hyphen() {
        let result = ok(concat!(
            r#"<w:p><w:r><w:br w:type="page"/><w:t>Multi</w:t><w:noBreakHyphen/>"#,
            r#"<w:t>level Paging</w:t></w:r></w:p>"#
        ));
        assert_eq!(result, vec![Paragraph::plain("Multi-level Paging")]);
    }

    #[test]
    fn test_positional_tab() {
        let result = ok(r#"<w:p><w:r><w:t>Unit</w:t><w:ptab w:relativeTo="margin" w:alignment="left" w:leader="none"/><w:t>3</w:t></w:r></w:p>"#);
        assert_eq!(result, vec![Paragraph::plain("Unit\t3")]);
    }

    #[test]
    fn test_runs_are_concatenated() {
        let result = ok(r#"<w:p><w:r><w:t>Memory </w:t></w:r><w:r><w:t>Mgmt</w:t></w:r></w:p>"#);
        assert_eq!(result, vec![Paragraph::plain("Memory Mgmt")]);
    }

    #[test]
    fn test_style_id_is_read() {
        let result = ok(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading 1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p><w:p><w:r><w:t>text</w:t></w:r></w:p>"#,
        );
        assert_eq!(
            result,
            vec![Paragraph::styled("Intro", "Heading 1"), Paragraph::plain("text")]
        );
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let result = ok(
            r#"<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C &amp; D</w:t></w:r></w:p>"#,
        );
        assert_eq!(result[0].text, "A\tB\nC & D");
    }

    #[test]
    fn test_empty_and_self_closing_paragraphs() {
        let result = ok(r#"<w:p/><w:p></w:p><w:p><w:r><w:t xml:space="preserve">   </w:t></w:r></w:p>"#);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "");
        assert_eq!(result[1].text, "");
        assert_eq!(result[2].text, "   ");
    }

    #[test]
    fn test_hyperlink_text_is_included() {
        let result = ok(
            r#"<w:p><w:r><w:t>See </w:t></w:r><w:hyperlink><w:r><w:t>Processes</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(result[0].text, "See Processes");
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let result = ok(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        let texts: Vec<_> = result.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["before", "after"]);
    }

    #[test]
    fn test_deleted_text_is_ignored() {
        let result = ok(r#"<w:p><w:r><w:t>kept</w:t></w:r><w:del><w:r><w:delText>gone</w:delText></w:r></w:del></w:p>"#);
        assert_eq!(result[0].text, "kept");
    }

    #[test]
    fn test_malformed_xml_ends_iteration() {
        let items = paragraphs(r#"<w:p><w:r><w:t>ok</w:t></w:r></w:p><w:p><w:r></w:p>"#);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].as_ref().unwrap_err().is_document_error());
    }

    #[test]
    fn test_missing_body() {
        let items: Vec<_> = Paragraphs::new(
            PathBuf::from("test.docx"),
            b"<root/>".to_vec(),
            StyleSheet::default(),
        )
        .collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn test_iteration_is_lazy() {
        let mut iter = Paragraphs::new(
            PathBuf::from("test.docx"),
            br#"<w:document><w:body><w:p><w:r><w:t>first</w:t></w:r></w:p><w:p><w:r></w:body></w:document>"#.to_vec(),
            StyleSheet::default(),
        );
        // The first paragraph is produced before the broken tail is read
        assert_eq!(iter.next().unwrap().unwrap().text, "first");
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }
}

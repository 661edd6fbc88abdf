//! `.docx` package access
//!
//! The package is a zip archive. The main document part is located
//! through the package relationships (`_rels/.rels`) and the style part
//! through the document's own relationships, falling back to the
//! conventional `word/` locations when a relationship is absent.

use super::paragraphs::Paragraphs;
use super::styles::StyleSheet;
use super::xml::attribute;
use crate::error::{Result, SyllabusError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const STYLES_REL: &str = "/styles";

/// An opened WordprocessingML document
#[derive(Debug)]
pub struct DocxDocument {
    path: PathBuf,
    document_part: String,
    document_xml: Vec<u8>,
    styles: StyleSheet,
}

impl DocxDocument {
    /// Open and validate the package at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SyllabusError::document(path, "file not found")
            } else {
                SyllabusError::document(path, e.to_string())
            }
        })?;

        Self::from_reader(path, BufReader::new(file))
    }

    /// Read a package from any seekable source; `path` labels errors
    pub fn from_reader<R: Read + Seek>(path: impl Into<PathBuf>, reader: R) -> Result<Self> {
        let path = path.into();
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| SyllabusError::document(&path, format!("not a valid .docx package: {}", e)))?;

        let document_part = match read_part(&path, &mut archive, PACKAGE_RELS)? {
            Some(rels) => find_relationship(&path, &rels, "", OFFICE_DOCUMENT_REL)?,
            None => None,
        }
        .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string());

        let document_xml = read_part(&path, &mut archive, &document_part)?.ok_or_else(|| {
            SyllabusError::document(&path, format!("missing main document part '{}'", document_part))
        })?;

        let styles = match locate_styles_part(&path, &mut archive, &document_part)? {
            Some(xml) => StyleSheet::parse(&xml)
                .map_err(|e| SyllabusError::document(&path, format!("invalid style part: {}", e)))?,
            None => StyleSheet::default(),
        };

        tracing::debug!(
            path = %path.display(),
            part = %document_part,
            styles = styles.len(),
            "Opened document package"
        );

        Ok(Self {
            path,
            document_part,
            document_xml,
            styles,
        })
    }

    /// Path the document was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the main document part inside the package
    pub fn document_part(&self) -> &str {
        &self.document_part
    }

    /// Style definitions of the document
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Consume the document into its lazy paragraph sequence
    pub fn paragraphs(self) -> Paragraphs {
        Paragraphs::new(self.path, self.document_xml, self.styles)
    }
}

fn read_part<R: Read + Seek>(
    path: &Path,
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(SyllabusError::document(path, format!("cannot read part '{}': {}", name, e)))
        }
    };

    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| SyllabusError::document(path, format!("cannot read part '{}': {}", name, e)))?;

    Ok(Some(bytes))
}

fn locate_styles_part<R: Read + Seek>(
    path: &Path,
    archive: &mut ZipArchive<R>,
    document_part: &str,
) -> Result<Option<Vec<u8>>> {
    let (dir, file) = split_part_name(document_part);
    let rels_name = if dir.is_empty() {
        format!("_rels/{}.rels", file)
    } else {
        format!("{}/_rels/{}.rels", dir, file)
    };

    let styles_part = match read_part(path, archive, &rels_name)? {
        Some(rels) => find_relationship(path, &rels, dir, STYLES_REL)?,
        None => None,
    };

    match styles_part {
        Some(name) => read_part(path, archive, &name),
        None => read_part(path, archive, &join_part_name(dir, "styles.xml")),
    }
}

/// Find the target of the first relationship whose type ends with `type_suffix`
fn find_relationship(
    path: &Path,
    rels_xml: &[u8],
    base_dir: &str,
    type_suffix: &str,
) -> Result<Option<String>> {
    let invalid = |e: String| SyllabusError::document(path, format!("invalid relationships: {}", e));
    let mut reader = Reader::from_reader(rels_xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(|e| invalid(e.to_string()))? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let rel_type = attribute(&e, b"Type").map_err(invalid)?.unwrap_or_default();
                if rel_type.ends_with(type_suffix) {
                    let target = attribute(&e, b"Target").map_err(invalid)?.unwrap_or_default();
                    return Ok(Some(resolve_target(base_dir, &target)));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn split_part_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", name),
    }
}

fn join_part_name(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Resolve a relationship target against the source part's directory
fn resolve_target(base_dir: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => join_part_name(base_dir, target),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DocxFixture;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_open_and_iterate() {
        let dir = TempDir::new().unwrap();
        let path = DocxFixture::new()
            .heading("Intro")
            .paragraph("text")
            .heading("Memory Mgmt!")
            .write_to(dir.path(), "syllabus.docx");

        let document = DocxDocument::open(&path).unwrap();
        assert_eq!(document.document_part(), "word/document.xml");
        assert!(!document.styles().is_empty());

        let paragraphs: Vec<_> = document.paragraphs().map(|p| p.unwrap()).collect();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].style.as_deref(), Some("Heading 1"));
        assert_eq!(paragraphs[1].style.as_deref(), Some("Normal"));
        assert_eq!(paragraphs[2].text, "Memory Mgmt!");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = DocxDocument::open(&dir.path().join("absent.docx")).unwrap_err();
        assert!(err.is_document_error());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.docx");
        std::fs::write(&path, "just some text").unwrap();

        let err = DocxDocument::open(&path).unwrap_err();
        assert!(err.is_document_error());
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = DocxFixture::new().without_document_part().to_bytes();
        let err = DocxDocument::from_reader("broken.docx", Cursor::new(bytes)).unwrap_err();
        assert!(err.is_document_error());
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_relocated_document_part() {
        let bytes = DocxFixture::new()
            .heading("Scheduling")
            .document_part("content/main.xml")
            .to_bytes();
        let document = DocxDocument::from_reader("moved.docx", Cursor::new(bytes)).unwrap();
        assert_eq!(document.document_part(), "content/main.xml");

        let first = document.paragraphs().next().unwrap().unwrap();
        assert_eq!(first, crate::document::Paragraph::styled("Scheduling", "Heading 1"));
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("", "word/document.xml"), "word/document.xml");
        assert_eq!(resolve_target("word", "styles.xml"), "word/styles.xml");
        assert_eq!(resolve_target("word", "/word/styles.xml"), "word/styles.xml");
        assert_eq!(resolve_target("word/sub", "../styles.xml"), "word/styles.xml");
    }
}

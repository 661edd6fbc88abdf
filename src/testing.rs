//! Test fixtures: minimal `.docx` packages built in memory

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// Builder for a small WordprocessingML package
pub(crate) struct DocxFixture {
    paragraphs: Vec<(String, Option<String>)>,
    document_part: String,
    include_document: bool,
    include_styles: bool,
}

impl DocxFixture {
    pub(crate) fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            document_part: "word/document.xml".to_string(),
            include_document: true,
            include_styles: true,
        }
    }

    /// Paragraph styled with the built-in "heading 1" style
    pub(crate) fn heading(self, text: &str) -> Self {
        self.styled(text, "Heading1")
    }

    /// Paragraph styled with the built-in "heading 2" style
    pub(crate) fn subheading(self, text: &str) -> Self {
        self.styled(text, "Heading2")
    }

    /// Paragraph without a style reference
    pub(crate) fn paragraph(mut self, text: &str) -> Self {
        self.paragraphs.push((text.to_string(), None));
        self
    }

    /// Paragraph referencing an arbitrary style id
    pub(crate) fn styled(mut self, text: &str, style_id: &str) -> Self {
        self.paragraphs
            .push((text.to_string(), Some(style_id.to_string())));
        self
    }

    pub(crate) fn document_part(mut self, name: &str) -> Self {
        self.document_part = name.to_string();
        self
    }

    pub(crate) fn without_document_part(mut self) -> Self {
        self.include_document = false;
        self
    }

    pub(crate) fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn document_xml(&self) -> String {
        let mut body = String::new();
        for (text, style) in &self.paragraphs {
            body.push_str("<w:p>");
            if let Some(style) = style {
                body.push_str(&format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>", escape(style)));
            }
            body.push_str(&format!(
                "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                escape(text)
            ));
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"{}\"><w:body>{}<w:sectPr/></w:body></w:document>",
            W_NS, body
        )
    }

    fn styles_xml() -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:styles xmlns:w=\"{}\">\
             <w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/></w:style>\
             <w:style w:type=\"paragraph\" w:styleId=\"Heading1\"><w:name w:val=\"heading 1\"/><w:basedOn w:val=\"Normal\"/></w:style>\
             <w:style w:type=\"paragraph\" w:styleId=\"Heading2\"><w:name w:val=\"heading 2\"/><w:basedOn w:val=\"Normal\"/></w:style>\
             <w:style w:type=\"character\" w:styleId=\"Heading1Char\"><w:name w:val=\"Heading 1 Char\"/></w:style>\
             </w:styles>",
            W_NS
        )
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let package_rels = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Relationships xmlns=\"{}\"><Relationship Id=\"rId1\" Type=\"{}\" Target=\"{}\"/></Relationships>",
            REL_NS, OFFICE_DOCUMENT, self.document_part
        );
        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(package_rels.as_bytes()).unwrap();

        if self.include_document {
            zip.start_file(self.document_part.as_str(), options).unwrap();
            zip.write_all(self.document_xml().as_bytes()).unwrap();
        }

        if self.include_styles {
            let (dir, file) = self
                .document_part
                .rsplit_once('/')
                .unwrap_or(("", self.document_part.as_str()));
            let prefix = if dir.is_empty() { String::new() } else { format!("{}/", dir) };

            let document_rels = format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                 <Relationships xmlns=\"{}\"><Relationship Id=\"rId1\" Type=\"{}\" Target=\"styles.xml\"/></Relationships>",
                REL_NS, STYLES
            );
            zip.start_file(format!("{}_rels/{}.rels", prefix, file), options)
                .unwrap();
            zip.write_all(document_rels.as_bytes()).unwrap();

            zip.start_file(format!("{}styles.xml", prefix), options)
                .unwrap();
            zip.write_all(Self::styles_xml().as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    pub(crate) fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//! Syllabus document reading
//!
//! A `.docx` file is a zip package of WordprocessingML parts. This module
//! opens the package, resolves the main document and style parts, and
//! exposes the body paragraphs as a lazy, single-pass sequence.

mod model;
mod package;
mod paragraphs;
mod styles;
mod xml;

pub use model::Paragraph;
pub use package::DocxDocument;
pub use paragraphs::Paragraphs;
pub use styles::{Style, StyleKind, StyleSheet};

//! Core module tree generation
//!
//! Extracts module headings from a syllabus document and materializes
//! one directory per heading, each holding a placeholder README.

mod builder;
mod heading;

pub use builder::*;
pub use heading::*;

//! # syllabus-tree - Module Directories from a Syllabus
//!
//! syllabus-tree reads a syllabus written as a Word document and turns
//! every top-level heading into a module directory with a placeholder
//! README, giving course material a consistent on-disk layout.
//!
//! ## Features
//!
//! - **Direct `.docx` Reading**: Paragraphs and style names are read from
//!   the WordprocessingML package, no office suite required
//! - **Lazy Paragraph Scan**: The document body is parsed as a single pass
//! - **Filesystem-Safe Names**: Headings are sanitized to `[A-Za-z0-9 _-]`
//! - **Idempotent Builds**: Existing directories are reused and READMEs
//!   are overwritten, so re-running is safe
//! - **Injected Observers**: Logging, progress and test recording are
//!   passed to the builder instead of configured globally
//!
//! ## Quick Start
//!
//! ```no_run
//! use syllabus_tree::core::build_tree;
//! use std::path::Path;
//!
//! let report = build_tree(
//!     Path::new("syllabus.docx"),
//!     Path::new("Operating_Systems_Project"),
//! ).unwrap();
//!
//! println!("Created {} modules", report.modules.len());
//! ```
//!
//! ## Advanced Usage
//!
//! ```no_run
//! use syllabus_tree::config::BuildConfig;
//! use syllabus_tree::core::SyllabusTreeBuilder;
//! use syllabus_tree::progress::ProgressReporter;
//! use std::path::{Path, PathBuf};
//!
//! let config = BuildConfig {
//!     base_dir: PathBuf::from("OSProj"),
//!     dry_run: true,
//!     ..Default::default()
//! };
//!
//! let builder = SyllabusTreeBuilder::new(config).with_progress(ProgressReporter::new());
//! let report = builder.build_configured(Path::new("syllabus.docx")).unwrap();
//! report.print_summary();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod fs;
pub mod progress;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::BuildConfig;
pub use core::{build_tree, sanitize_name, BuildReport, SyllabusTreeBuilder};
pub use error::{Result, SyllabusError};
pub use progress::{BuildObserver, ProgressReporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use syllabus_tree::prelude::*;
    //! ```

    pub use crate::config::BuildConfig;
    pub use crate::core::{
        build_tree, readme_content, sanitize_name, BuildReport, Heading, ModuleDirectory,
        SyllabusTreeBuilder, DEFAULT_BASE_DIR,
    };
    pub use crate::document::{DocxDocument, Paragraph};
    pub use crate::error::{Result, SyllabusError};
    pub use crate::progress::{BuildObserver, ProgressReporter, RecordingObserver, TracingObserver};
}

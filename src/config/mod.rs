//! Configuration module for syllabus-tree
//!
//! Provides CLI argument parsing and the runtime build configuration.

mod settings;

pub use settings::*;

//! File system operations module
//!
//! Provides idempotent directory creation and overwriting file writes
//! used to materialize the module tree.

mod operations;

pub use operations::*;

//! Build observation module
//!
//! Observers are handed to the builder explicitly instead of relying on
//! process-wide logging state. The default observer emits structured
//! `tracing` events; the progress reporter draws a bar over module
//! creation; the recording observer keeps events in memory.

mod observer;
mod reporter;

pub use observer::*;
pub use reporter::*;

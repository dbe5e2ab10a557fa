//! Target discovery
//!
//! This module turns the invocation's input source, a single URL or a
//! file with one URL per line, into the ordered target list.

pub mod targets;

// Re-export commonly used items
pub use targets::{TargetSource, parse_targets, read_targets};

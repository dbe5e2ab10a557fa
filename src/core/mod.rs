//! Core types and foundational components
//!
//! This module contains the probe data model, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{Result, TlsUpError};
pub use types::{ProbeOutcome, ProbeReport, ProbeStatus, ProbeTarget};

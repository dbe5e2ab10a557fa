//! User interface and interaction
//!
//! CLI parsing, report rendering, progress reporting and terminal colors.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config, cli_warnings};
pub use output::{display_report, render_report};
pub use progress::ProgressReporter;

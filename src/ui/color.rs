//! Color and formatting utilities for terminal output

use std::io::IsTerminal;

use crate::core::types::ProbeStatus;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const MAGENTA: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
}

/// Apply color to text if the terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Check if stdout is a terminal that understands ANSI colors
pub fn supports_formatting() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    // Disable formatting when running tests
    if cfg!(test) || std::env::var_os("RUST_TEST_TIME_UNIT").is_some() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) => !(term.is_empty() || term == "dumb"),
        Err(_) => false,
    }
}

/// Color used for a status label
pub fn status_color(status: ProbeStatus) -> &'static str {
    match status {
        ProbeStatus::Valid => Colors::GREEN,
        ProbeStatus::HttpError => Colors::YELLOW,
        ProbeStatus::ConnectError => Colors::MAGENTA,
        ProbeStatus::TlsError => Colors::BRIGHT_RED,
        ProbeStatus::TimeoutError => Colors::CYAN,
        ProbeStatus::UnknownError => Colors::RED,
    }
}

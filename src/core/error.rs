use std::fmt;

/// Run-level error types for tlsup.
///
/// Per-target network and TLS failures never show up here: they are
/// converted into a [`ProbeOutcome`](crate::core::types::ProbeOutcome) at the
/// prober boundary. These variants cover everything that stops a run before
/// a report can be produced.
#[derive(Debug)]
pub enum TlsUpError {
    /// IO error (reading the target file, writing output)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Input file not found
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Report serialization error
    Serialization(serde_json::Error),
}

impl fmt::Display for TlsUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsUpError::Io(err) => write!(f, "IO error: {err}"),
            TlsUpError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TlsUpError::Http(err) => write!(f, "HTTP client error: {err}"),
            TlsUpError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            TlsUpError::FileNotFound(path) => write!(f, "File not found: {path}"),
            TlsUpError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            TlsUpError::Serialization(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for TlsUpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TlsUpError::Io(err) => Some(err),
            TlsUpError::Http(err) => Some(err),
            TlsUpError::TomlParsing(err) => Some(err),
            TlsUpError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TlsUpError {
    fn from(err: std::io::Error) -> Self {
        TlsUpError::Io(err)
    }
}

impl From<reqwest::Error> for TlsUpError {
    fn from(err: reqwest::Error) -> Self {
        TlsUpError::Http(err)
    }
}

impl From<toml::de::Error> for TlsUpError {
    fn from(err: toml::de::Error) -> Self {
        TlsUpError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for TlsUpError {
    fn from(err: serde_json::Error) -> Self {
        TlsUpError::Serialization(err)
    }
}

/// Type alias for Results using TlsUpError
pub type Result<T> = std::result::Result<T, TlsUpError>;

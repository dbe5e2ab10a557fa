/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values shared between the probe core,
/// the configuration layer and the output adapters.
/// Output format constants
pub mod output_formats {
    /// JSON output format - array of `{url, status}` objects
    pub const JSON: &str = "json";
    /// Text output format - one aligned line per target plus a summary
    pub const TEXT: &str = "text";
    /// Minimal output format - `<category> <url>` per line
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = JSON;

    /// All valid output formats
    pub const ALL: [&str; 3] = [JSON, TEXT, MINIMAL];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status that classifies as valid
    pub const OK: u16 = 200;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-probe timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
    /// Largest accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Timeout above which the CLI prints a warning
    pub const WARN_TIMEOUT_SECONDS: u64 = 300;
}

/// Default configuration values
pub mod defaults {
    /// Redirects are not followed unless asked for
    pub const FOLLOW_REDIRECTS: bool = false;
    /// Hop limit used when redirects are followed
    pub const MAX_REDIRECTS: usize = 10;
    /// Largest accepted redirect hop limit
    pub const MAX_REDIRECTS_LIMIT: usize = 50;
    /// Largest accepted in-flight bound
    pub const MAX_CONCURRENCY: usize = 10_000;
    /// Plain `http://` targets are still requested unless `https_only` is
    /// set, but a response that did not arrive over HTTPS is never valid
    pub const HTTPS_ONLY: bool = false;
}

/// Status labels as they appear in reports
pub mod status_labels {
    pub const VALID: &str = "valid";
    pub const HTTP_ERROR: &str = "http_error";
    pub const CONNECT_ERROR: &str = "connect_error";
    pub const TLS_ERROR: &str = "tls_error";
    pub const TIMEOUT_ERROR: &str = "timeout_error";
    pub const UNKNOWN_ERROR: &str = "unknown_error";

    /// All labels, in taxonomy order
    pub const ALL: [&str; 6] = [
        VALID,
        HTTP_ERROR,
        CONNECT_ERROR,
        TLS_ERROR,
        TIMEOUT_ERROR,
        UNKNOWN_ERROR,
    ];
}

/// Error message constants
pub mod error_messages {
    /// Detail for a probe whose own timeout expired
    pub const PROBE_TIMED_OUT: &str = "no response within";
    /// Detail for a probe cancelled by the batch deadline
    pub const BATCH_DEADLINE_EXCEEDED: &str = "batch deadline exceeded after";
    /// Detail for a probe task that ended without reporting back
    pub const PROBE_TASK_LOST: &str = "probe task did not complete";
    /// Detail for a response whose final URL is not `https://`
    pub const NOT_SERVED_OVER_HTTPS: &str = "response was not served over HTTPS";
    /// Fallback when an error carries no message at all
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}

/// Configuration file constants
pub mod files {
    /// Name of the configuration file looked up in standard locations
    pub const CONFIG_FILE_NAME: &str = ".tlsup.toml";
    /// How many parent directories are searched for the configuration file
    pub const CONFIG_PARENT_LEVELS: usize = 3;
}

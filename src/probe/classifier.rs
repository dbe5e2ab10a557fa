//! Classification of probe attempts
//!
//! Maps the raw result of one HTTPS attempt onto the closed
//! [`ProbeStatus`] taxonomy. Everything here is pure: no I/O, no logging.

use std::error::Error;
use std::time::Duration;

use crate::core::constants::{error_messages, http_status};
use crate::core::types::ProbeStatus;

/// Transport-level failure categories, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// DNS resolution, TCP refusal, unreachable network
    Connect,
    /// TLS handshake or certificate verification
    Tls,
    /// The HTTP client gave up waiting
    Timeout,
    /// Anything else, including malformed URLs
    Other,
}

/// What happened during one attempt, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The handshake succeeded and a response head arrived.
    Response {
        status: u16,
        reason: Option<&'static str>,
    },
    /// The attempt failed before a response arrived.
    Failure { kind: FailureKind, message: String },
    /// The per-probe timeout expired.
    TimedOut(Duration),
}

/// Category plus optional diagnostic text for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: ProbeStatus,
    pub detail: Option<String>,
}

impl AttemptOutcome {
    /// Describe a received HTTP status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        AttemptOutcome::Response {
            status: status.as_u16(),
            reason: status.canonical_reason(),
        }
    }

    /// Describe a response that arrived without TLS, either because the
    /// target was `http://` or because a redirect downgraded it.
    pub fn from_plaintext_response(final_url: &reqwest::Url) -> Self {
        AttemptOutcome::Failure {
            kind: FailureKind::Other,
            message: format!("{} ({final_url})", error_messages::NOT_SERVED_OVER_HTTPS),
        }
    }

    /// Describe a failed request.
    pub fn from_error(err: &reqwest::Error) -> Self {
        AttemptOutcome::Failure {
            kind: failure_kind(err),
            message: request_error_detail(err),
        }
    }
}

/// Classify one attempt. Total over every [`AttemptOutcome`].
pub fn classify(outcome: &AttemptOutcome) -> Classification {
    match outcome {
        AttemptOutcome::Response { status, .. } if *status == http_status::OK => Classification {
            status: ProbeStatus::Valid,
            detail: None,
        },
        AttemptOutcome::Response { status, reason } => Classification {
            status: ProbeStatus::HttpError,
            detail: Some(match reason {
                Some(reason) => format!("HTTP {status} {reason}"),
                None => format!("HTTP {status}"),
            }),
        },
        AttemptOutcome::Failure { kind, message } => Classification {
            status: match kind {
                FailureKind::Connect => ProbeStatus::ConnectError,
                FailureKind::Tls => ProbeStatus::TlsError,
                FailureKind::Timeout => ProbeStatus::TimeoutError,
                FailureKind::Other => ProbeStatus::UnknownError,
            },
            detail: Some(if message.is_empty() {
                error_messages::UNKNOWN_ERROR.to_string()
            } else {
                message.clone()
            }),
        },
        AttemptOutcome::TimedOut(budget) => Classification {
            status: ProbeStatus::TimeoutError,
            detail: Some(format!(
                "{} {}",
                error_messages::PROBE_TIMED_OUT,
                format_duration(*budget)
            )),
        },
    }
}

/// Work out which transport stage a request error came from.
///
/// TLS is checked before connect: the HTTP client reports failed handshakes
/// as connect errors.
pub fn failure_kind(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        return FailureKind::Timeout;
    }
    // The top-level message embeds the URL, so only the causes are inspected.
    if err.source().is_some_and(is_tls_failure) {
        return FailureKind::Tls;
    }
    if err.is_connect() {
        return FailureKind::Connect;
    }
    FailureKind::Other
}

/// Whether an error chain contains a TLS failure.
///
/// A `rustls::Error` anywhere in the chain is conclusive, including one
/// wrapped as the payload of an `io::Error`. Certificate and handshake
/// wording in a message is accepted as a fallback.
pub fn is_tls_failure(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<rustls::Error>() || mentions_tls(&e.to_string()) {
            return true;
        }
        // io::Error::source skips its own payload
        if let Some(io) = e.downcast_ref::<std::io::Error>()
            && let Some(inner) = io.get_ref()
            && is_tls_failure(inner)
        {
            return true;
        }
        current = e.source();
    }
    false
}

fn mentions_tls(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    ["certificate", "handshake", "tls", "ssl"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Diagnostic text for a request error, without the URL the client adds.
pub fn request_error_detail(err: &reqwest::Error) -> String {
    match err.source() {
        Some(source) => chain_detail(source),
        None => err.to_string(),
    }
}

/// Join the messages of an error chain, skipping messages already contained
/// in the previous one.
pub fn chain_detail(err: &(dyn Error + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        let repeated = parts.last().is_some_and(|last| last.contains(&message));
        if !message.is_empty() && !repeated {
            parts.push(message);
        }
        current = e.source();
    }

    if parts.is_empty() {
        error_messages::UNKNOWN_ERROR.to_string()
    } else {
        parts.join(": ")
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

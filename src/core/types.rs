use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::constants::status_labels;

/// A single URL to probe, exactly as it was supplied.
///
/// Targets are never normalized or validated before probing. Duplicates are
/// kept and probed independently.
pub type ProbeTarget = String;

/// Classification category of one probe.
///
/// The set is closed: every attempt, whatever happened on the wire, ends up
/// in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// TLS handshake succeeded and the server answered 200
    Valid,
    /// TLS handshake succeeded but the server answered something else
    HttpError,
    /// The transport connection could not be established (DNS, refusal, routing)
    ConnectError,
    /// The TLS handshake failed, typically on certificate verification
    TlsError,
    /// No response within the configured timeout
    TimeoutError,
    /// Anything not covered above
    UnknownError,
}

impl ProbeStatus {
    /// All categories, in taxonomy order.
    pub const ALL: [ProbeStatus; 6] = [
        ProbeStatus::Valid,
        ProbeStatus::HttpError,
        ProbeStatus::ConnectError,
        ProbeStatus::TlsError,
        ProbeStatus::TimeoutError,
        ProbeStatus::UnknownError,
    ];

    /// The snake_case label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            ProbeStatus::Valid => status_labels::VALID,
            ProbeStatus::HttpError => status_labels::HTTP_ERROR,
            ProbeStatus::ConnectError => status_labels::CONNECT_ERROR,
            ProbeStatus::TlsError => status_labels::TLS_ERROR,
            ProbeStatus::TimeoutError => status_labels::TIMEOUT_ERROR,
            ProbeStatus::UnknownError => status_labels::UNKNOWN_ERROR,
        }
    }

    pub fn is_valid(self) -> bool {
        self == ProbeStatus::Valid
    }

    pub fn is_failure(self) -> bool {
        !self.is_valid()
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusLabel(pub String);

impl fmt::Display for UnknownStatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown status '{}'. Expected one of: {}",
            self.0,
            status_labels::ALL.join(", ")
        )
    }
}

impl std::error::Error for UnknownStatusLabel {}

impl FromStr for ProbeStatus {
    type Err = UnknownStatusLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProbeStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownStatusLabel(s.to_string()))
    }
}

/// Result of probing one target.
///
/// Built once by the prober and never mutated afterwards, hence the private
/// fields. `detail` is only ever present for failure categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    url: String,
    status: ProbeStatus,
    detail: Option<String>,
}

impl ProbeOutcome {
    /// Create an outcome. Any detail given for a valid status is dropped.
    pub fn new(url: impl Into<String>, status: ProbeStatus, detail: Option<String>) -> Self {
        let detail = if status.is_valid() { None } else { detail };
        Self {
            url: url.into(),
            status,
            detail,
        }
    }

    /// Shorthand for a valid outcome.
    pub fn valid(url: impl Into<String>) -> Self {
        Self::new(url, ProbeStatus::Valid, None)
    }

    /// Shorthand for a failed outcome with a diagnostic message.
    pub fn failed(url: impl Into<String>, status: ProbeStatus, detail: impl Into<String>) -> Self {
        Self::new(url, status, Some(detail.into()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> ProbeStatus {
        self.status
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Status text as written to reports: `valid`, or `<category>: <detail>`.
    pub fn report_status(&self) -> String {
        match (&self.status, &self.detail) {
            (ProbeStatus::Valid, _) => self.status.label().to_string(),
            (status, Some(detail)) if !detail.is_empty() => format!("{status}: {detail}"),
            (status, _) => status.label().to_string(),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.url, self.report_status())
    }
}

impl Serialize for ProbeOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProbeOutcome", 2)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("status", &self.report_status())?;
        state.end()
    }
}

/// Ordered outcomes of one batch, index-aligned with the input targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProbeReport {
    outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProbeOutcome> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeOutcome> {
        self.outcomes.iter()
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<ProbeOutcome> {
        self.outcomes
    }

    /// Statuses in report order.
    pub fn statuses(&self) -> Vec<ProbeStatus> {
        self.outcomes.iter().map(ProbeOutcome::status).collect()
    }

    pub fn valid_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_valid()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.valid_count()
    }

    /// Number of outcomes per category. Categories that never occurred are absent.
    pub fn count_by_status(&self) -> BTreeMap<ProbeStatus, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            *counts.entry(outcome.status()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ProbeReport {
    type Item = &'a ProbeOutcome;
    type IntoIter = std::slice::Iter<'a, ProbeOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

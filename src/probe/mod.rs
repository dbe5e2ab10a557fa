//! Concurrent HTTPS probing
//!
//! The classifier maps raw attempt results onto the status taxonomy, the
//! prober performs one attempt per target and the dispatcher fans the
//! attempts out and reassembles them in input order.

pub mod classifier;
pub mod dispatcher;
pub mod prober;
#[cfg(test)]
pub(crate) mod tls_fixture;

use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{defaults, timeouts};
use crate::core::error::Result;
use crate::core::types::{ProbeReport, ProbeTarget};
use crate::ui::progress::ProgressReporter;

// Re-export commonly used items
pub use classifier::{AttemptOutcome, Classification, FailureKind, classify};
pub use dispatcher::{DispatchOptions, Dispatcher};
pub use prober::{HttpsProber, Probe};

/// Everything a probe run needs, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Budget for one attempt: DNS, connect, handshake and response head
    pub timeout: Duration,
    /// Optional cap on simultaneous probes
    pub max_in_flight: Option<usize>,
    /// Optional cap on the whole batch
    pub batch_deadline: Option<Duration>,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// Reject plain `http://` targets
    pub https_only: bool,
    pub user_agent: Option<String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
            max_in_flight: None,
            batch_deadline: None,
            follow_redirects: defaults::FOLLOW_REDIRECTS,
            max_redirects: defaults::MAX_REDIRECTS,
            https_only: defaults::HTTPS_ONLY,
            user_agent: None,
        }
    }
}

impl ProbeSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.timeout_duration(),
            max_in_flight: config.concurrency,
            batch_deadline: config.batch_timeout_duration(),
            follow_redirects: config.follow_redirects.unwrap_or(defaults::FOLLOW_REDIRECTS),
            max_redirects: config.max_redirects.unwrap_or(defaults::MAX_REDIRECTS),
            https_only: config.https_only.unwrap_or(defaults::HTTPS_ONLY),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            max_in_flight: self.max_in_flight,
            batch_deadline: self.batch_deadline,
        }
    }
}

/// Probe `targets` over HTTPS and return an index-aligned report.
///
/// Fails only if the HTTP client cannot be built; per-target failures are
/// part of the report.
pub async fn probe_targets(targets: &[ProbeTarget], settings: &ProbeSettings) -> Result<ProbeReport> {
    probe_targets_with_progress(targets, settings, None).await
}

/// Same as [`probe_targets`], reporting progress as probes complete.
pub async fn probe_targets_with_progress(
    targets: &[ProbeTarget],
    settings: &ProbeSettings,
    progress: Option<&ProgressReporter>,
) -> Result<ProbeReport> {
    if targets.is_empty() {
        return Ok(ProbeReport::default());
    }

    let prober = HttpsProber::new(settings)?;
    let dispatcher = Dispatcher::new(prober, settings.dispatch_options());
    Ok(dispatcher.run(targets, progress).await)
}

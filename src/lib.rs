//! tlsup probes a list of HTTPS endpoints concurrently and reports, per
//! target, whether a TLS handshake and an HTTP GET succeeded.
//!
//! Every target ends up with exactly one [`ProbeOutcome`]: `valid`, or one of
//! `connect_error`, `tls_error`, `http_error`, `timeout_error` and
//! `unknown_error` with a human-readable detail. A failing target never aborts
//! the batch, and the [`ProbeReport`] keeps the input order.
//!
//! ```no_run
//! # async fn run() -> tlsup::Result<()> {
//! let targets = vec!["https://example.com".to_string()];
//! let report = tlsup::probe_targets(&targets, &tlsup::ProbeSettings::default()).await?;
//! println!("{}", tlsup::ui::output::render_json(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod probe;
pub mod reporting;
pub mod ui;

pub use crate::config::{CliConfig, Config};
pub use crate::core::error::{Result, TlsUpError};
pub use crate::core::types::{ProbeOutcome, ProbeReport, ProbeStatus, ProbeTarget};
pub use crate::discovery::TargetSource;
pub use crate::probe::{
    DispatchOptions, Dispatcher, HttpsProber, Probe, ProbeSettings, probe_targets,
    probe_targets_with_progress,
};

use crate::config::Config;
use crate::core::types::{ProbeOutcome, ProbeReport};
use crate::discovery::TargetSource;
use crate::probe::classifier::format_duration;
use log::{debug, error, info, warn};
use std::io::Write;
use std::time::Duration;

/// Initialize the logger with appropriate level based on verbosity.
///
/// Logs go to stderr; stdout carries only the report. `RUST_LOG` is honoured
/// unless `--verbose` or `--quiet` asks for something explicit.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    let mut builder = env_logger::Builder::from_default_env();
    if quiet || verbose || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));

    if builder.try_init().is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration();
    let concurrency = config
        .concurrency
        .map_or_else(|| "unbounded".to_string(), |n| n.to_string());
    let batch_timeout = config
        .batch_timeout_duration()
        .map_or_else(|| "none".to_string(), format_duration);
    let follow_redirects = config.follow_redirects.unwrap_or(false);
    let https_only = config.https_only.unwrap_or(false);

    info!(
        "Configuration: timeout={}, concurrency={concurrency}, batch_timeout={batch_timeout}",
        format_duration(timeout)
    );
    info!(
        "HTTP: follow_redirects={follow_redirects}, https_only={https_only}, format={}",
        config.output_format()
    );
}

/// Log where the targets came from
pub fn log_targets_loaded(source: &TargetSource, count: usize) {
    match source {
        TargetSource::Url(url) => info!("Probing single target {url}"),
        TargetSource::File(path) => info!("Loaded {count} target(s) from {}", path.display()),
    }
}

/// Log batch start
pub fn log_batch_start(target_count: usize, max_in_flight: Option<usize>) {
    match max_in_flight {
        Some(bound) => info!("Starting {target_count} probe(s), at most {bound} in flight"),
        None => info!("Starting {target_count} probe(s)"),
    }
}

/// Log an expired batch deadline
pub fn log_batch_deadline(budget: Duration, pending: usize) {
    warn!(
        "Batch deadline of {} reached, cancelling {pending} pending probe(s)",
        format_duration(budget)
    );
}

/// Log individual probe results for debugging
pub fn log_probe_result(outcome: &ProbeOutcome) {
    match outcome.detail() {
        None => debug!("✓ {} -> {}", outcome.url(), outcome.status()),
        Some(detail) => debug!("✗ {} -> {} ({detail})", outcome.url(), outcome.status()),
    }
}

/// Log batch completion
pub fn log_batch_complete(report: &ProbeReport, duration_ms: u128) {
    let total = report.len();
    let valid = report.valid_count();

    if valid == total {
        info!("✅ Probing complete: {valid}/{total} targets valid ({duration_ms}ms)");
    } else {
        let breakdown = report
            .count_by_status()
            .iter()
            .filter(|(status, _)| status.is_failure())
            .map(|(status, count)| format!("{status}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        warn!(
            "❌ Probing complete: {valid}/{total} targets valid, {} failed [{breakdown}] ({duration_ms}ms)",
            total - valid
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

//! Property-based tests for tlsup using proptest
//!
//! A scripted prober with random per-target delays stands in for the network,
//! so the dispatcher's ordering and completeness guarantees can be checked
//! across many batch shapes.

use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tlsup::core::constants::status_labels;
use tlsup::discovery::parse_targets;
use tlsup::{DispatchOptions, Dispatcher, Probe, ProbeOutcome, ProbeStatus, ProbeTarget};

/// Fails targets ending in a digit, delays each target by its scripted amount.
struct ScriptedProber {
    delays: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedProber {
    fn new(targets: &[ProbeTarget], delays_ms: &[u64]) -> Self {
        Self {
            delays: targets
                .iter()
                .zip(delays_ms)
                .map(|(target, ms)| (target.clone(), Duration::from_millis(*ms)))
                .collect(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Probe for ScriptedProber {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let delay = self.delays.get(target).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if target.ends_with(|c: char| c.is_ascii_digit()) {
            ProbeOutcome::failed(target, ProbeStatus::ConnectError, "scripted failure")
        } else {
            ProbeOutcome::valid(target)
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_time()
        .build()
        .unwrap()
}

/// Unique targets, some of which fail, each with a delay
fn batch_strategy() -> impl Strategy<Value = (Vec<ProbeTarget>, Vec<u64>)> {
    prop::collection::hash_set(r"https://[a-z]{3,8}\.test/[a-z0-9]{0,3}", 0..40)
        .prop_flat_map(|targets| {
            let targets: Vec<ProbeTarget> = targets.into_iter().collect();
            let len = targets.len();
            (Just(targets), prop::collection::vec(0..20u64, len))
        })
}

fn status_strategy() -> impl Strategy<Value = ProbeStatus> {
    prop::sample::select(ProbeStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_dispatch_preserves_order_and_length(
        (targets, delays) in batch_strategy(),
        bound in prop::option::of(1..8usize),
    ) {
        let prober = ScriptedProber::new(&targets, &delays);
        let dispatcher = Dispatcher::new(
            prober,
            DispatchOptions { max_in_flight: bound, batch_deadline: None },
        );

        let report = runtime().block_on(dispatcher.run(&targets, None));

        prop_assert_eq!(report.len(), targets.len());
        for (outcome, target) in report.iter().zip(&targets) {
            prop_assert_eq!(outcome.url(), target.as_str());
            let should_fail = target.ends_with(|c: char| c.is_ascii_digit());
            prop_assert_eq!(outcome.is_valid(), !should_fail);
        }
        prop_assert_eq!(report.valid_count() + report.failure_count(), targets.len());
    }

    #[test]
    fn test_dispatch_respects_concurrency_bound(
        (targets, delays) in batch_strategy(),
        bound in 1..6usize,
    ) {
        let prober = std::sync::Arc::new(ScriptedProber::new(&targets, &delays));
        let dispatcher = Dispatcher::with_shared(
            prober.clone(),
            DispatchOptions { max_in_flight: Some(bound), batch_deadline: None },
        );

        runtime().block_on(dispatcher.run(&targets, None));

        prop_assert!(prober.peak.load(Ordering::SeqCst) <= bound);
    }

    #[test]
    fn test_parse_targets_keeps_one_target_per_line(
        lines in prop::collection::vec(r"[ \t]{0,2}[a-z:/.]{0,20}[ \t]{0,2}", 0..30),
    ) {
        let content = lines.join("\n");
        let targets = parse_targets(&content);

        // `lines()` drops a single trailing empty line
        let expected = if content.is_empty() { 0 } else { content.lines().count() };
        prop_assert_eq!(targets.len(), expected);
        for target in &targets {
            prop_assert_eq!(target.trim(), target.as_str());
        }
    }

    #[test]
    fn test_report_status_shape(
        status in status_strategy(),
        detail in r"[a-zA-Z0-9 :]{1,40}",
    ) {
        let outcome = ProbeOutcome::failed("https://a.test", status, detail.clone());
        let rendered = outcome.report_status();

        if status == ProbeStatus::Valid {
            prop_assert_eq!(rendered, status_labels::VALID);
        } else {
            prop_assert_eq!(rendered, format!("{}: {}", status.label(), detail));
        }
        prop_assert_eq!(outcome.status(), status);
    }
}

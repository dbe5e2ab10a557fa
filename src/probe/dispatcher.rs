use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::core::constants::error_messages;
use crate::core::types::{ProbeOutcome, ProbeReport, ProbeStatus, ProbeTarget};
use crate::probe::classifier::format_duration;
use crate::probe::prober::Probe;
use crate::reporting::logging;
use crate::ui::progress::ProgressReporter;

/// Concurrency limits for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Maximum number of probes in flight at once. `None` fans out fully.
    pub max_in_flight: Option<usize>,
    /// Wall-clock cap for the whole batch. Probes still pending when it
    /// expires are cancelled and reported as `timeout_error`.
    pub batch_deadline: Option<Duration>,
}

/// Runs one probe per target concurrently and reassembles the results in
/// input order.
pub struct Dispatcher<P> {
    prober: Arc<P>,
    options: DispatchOptions,
}

impl<P: Probe + 'static> Dispatcher<P> {
    pub fn new(prober: P, options: DispatchOptions) -> Self {
        Self::with_shared(Arc::new(prober), options)
    }

    pub fn with_shared(prober: Arc<P>, options: DispatchOptions) -> Self {
        Self { prober, options }
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Probe every target and return a report index-aligned with `targets`.
    ///
    /// Each spawned task owns the index of its target and the result is
    /// written to that slot, so completion order never leaks into the report.
    pub async fn run(
        &self,
        targets: &[ProbeTarget],
        progress: Option<&ProgressReporter>,
    ) -> ProbeReport {
        if targets.is_empty() {
            return ProbeReport::default();
        }

        logging::log_batch_start(targets.len(), self.options.max_in_flight);
        if let Some(prog) = progress {
            prog.start_probing(targets.len());
        }

        let limiter = self
            .options
            .max_in_flight
            .map(|bound| Arc::new(Semaphore::new(bound.max(1))));

        let mut tasks = JoinSet::new();
        for (index, target) in targets.iter().enumerate() {
            let prober = Arc::clone(&self.prober);
            let limiter = limiter.clone();
            let target = target.clone();
            tasks.spawn(async move {
                // The permit lives until the probe is done.
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome = prober.probe(&target).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<ProbeOutcome>> = vec![None; targets.len()];
        let deadline = self
            .options
            .batch_deadline
            .map(|budget| (Instant::now() + budget, budget));
        let mut deadline_hit = false;
        let mut completed = 0;

        loop {
            let next = match deadline {
                Some((at, budget)) => match tokio::time::timeout_at(at, tasks.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        logging::log_batch_deadline(budget, tasks.len());
                        tasks.abort_all();
                        deadline_hit = true;
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            let Some(joined) = next else {
                break;
            };

            completed += 1;
            if let Some(prog) = progress {
                prog.update_probe_progress(completed);
            }

            match joined {
                Ok((index, outcome)) => {
                    logging::log_probe_result(&outcome);
                    slots[index] = Some(outcome);
                }
                Err(err) => logging::log_warning(&format!("Probe task failed: {err}")),
            }
        }

        let outcomes: Vec<ProbeOutcome> = slots
            .into_iter()
            .zip(targets)
            .map(|(slot, target)| {
                slot.unwrap_or_else(|| self.missing_outcome(target, deadline_hit))
            })
            .collect();
        let report = ProbeReport::new(outcomes);

        if let Some(prog) = progress {
            prog.finish_probing(report.valid_count(), report.len());
        }

        report
    }

    /// Outcome for a slot whose task never reported back.
    fn missing_outcome(&self, target: &str, deadline_hit: bool) -> ProbeOutcome {
        match self.options.batch_deadline {
            Some(budget) if deadline_hit => ProbeOutcome::failed(
                target,
                ProbeStatus::TimeoutError,
                format!(
                    "{} {}",
                    error_messages::BATCH_DEADLINE_EXCEEDED,
                    format_duration(budget)
                ),
            ),
            _ => ProbeOutcome::failed(
                target,
                ProbeStatus::UnknownError,
                error_messages::PROBE_TASK_LOST,
            ),
        }
    }
}

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::prelude::*;
use super::report;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Launching,
    Cancelling,
    Draining,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Launching => "launching",
            RunPhase::Cancelling => "cancelling",
            RunPhase::Draining => "draining",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Launches probes at a fixed cadence and collects their outcomes.
///
/// Every probe runs on its own task and owns a sender of the result queue.
/// The queue is closed and drained only after all launched tasks have been joined,
/// so a probe can never report into a closed queue.
pub struct ProbeRunner {
    prober: Arc<dyn Prober>,
}

impl ProbeRunner {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        ProbeRunner { prober }
    }

    /// Run `num_checks` probes spaced by `interval`.
    ///
    /// When `cancel` fires no further probes are launched. Probes still waiting on the
    /// network are abandoned and report nothing; results that were already reported are kept.
    pub async fn run_tests(
        &self,
        cancel: &CancellationToken,
        interval: Duration,
        num_checks: usize,
    ) -> TestResult {
        let mut phase = RunPhase::Idle;
        // Buffers grow with the launched probes; `num_checks` may be far larger than
        // anything that gets launched before cancellation.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handles = Vec::new();

        advance(&mut phase, RunPhase::Launching);
        for index in 0..num_checks {
            if cancel.is_cancelled() {
                break;
            }
            handles.push(self.launch(index, cancel.clone(), tx.clone()));

            if index + 1 < num_checks {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {}
                    _ = sleep(interval) => {}
                }
            }
        }
        drop(tx);

        if cancel.is_cancelled() {
            log::info!(
                "Cancellation received, launched {} of {} probes",
                handles.len(),
                num_checks
            );
            advance(&mut phase, RunPhase::Cancelling);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                log::error!("Probe task did not complete: {e}");
            }
        }

        advance(&mut phase, RunPhase::Draining);
        rx.close();
        let mut test_result = TestResult::default();
        while let Some(result) = rx.recv().await {
            test_result.push(result);
        }

        advance(&mut phase, RunPhase::Done);
        test_result
    }

    fn launch(
        &self,
        index: usize,
        cancel: CancellationToken,
        results: mpsc::UnboundedSender<CheckResult>,
    ) -> JoinHandle<()> {
        let prober = Arc::clone(&self.prober);

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::debug!("Probe {index} abandoned while in flight");
                    return;
                }
                outcome = prober.probe() => outcome,
            };

            let result = match outcome {
                Ok(status) => {
                    log::debug!("Probe {index} returned status {status}");
                    CheckResult::from_status(status)
                }
                Err(e) => {
                    log::warn!("Probe {index} failed: {}", report(&e));
                    CheckResult::failed()
                }
            };

            if cancel.is_cancelled() {
                log::debug!("Probe {index} finished after cancellation, result discarded");
                return;
            }

            if results.send(result).is_err() {
                log::error!("Result queue closed before probe {index} reported");
            }
        })
    }
}

fn advance(phase: &mut RunPhase, next: RunPhase) {
    log::debug!("Run phase {} -> {}", phase, next);
    *phase = next;
}

use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::error::EngineError;
use super::executor::{TrajectoryExecutor, Verdict};
use super::progress::{Progress, ProgressReporter};
use super::sampling::{Attempt, AttemptSampler};
use super::state::{RunReport, RunState, StopReason};
use crate::core::protocol::ProtocolSettings;
use crate::core::settings::RunSettings;
use crate::core::stats::{FailureRecord, StatsSink, TrajectoryRecord};
use crate::core::workspace::Workspace;

/// Hard upper bound on executed trajectories. A circuit breaker against
/// non-termination, not a tunable quality knob.
pub const DEFAULT_SAFETY_CEILING: u32 = 1000;

/// The acceptance loop: a strictly sequential
/// `Sampling -> (Skip | Execute) -> Classify -> (Continue | Stop)` cycle.
///
/// Single-writer discipline: only this loop mutates its `RunState`, and only
/// one loop may run against a workspace at a time. The duplicate guard's
/// check-then-execute sequence is not atomic, so parallel throughput must
/// come from independent workspaces, never concurrent loops over one.
pub struct DesignLoop<'a, E: TrajectoryExecutor> {
    settings: &'a RunSettings,
    protocol: &'a ProtocolSettings,
    workspace: &'a Workspace,
    stats: &'a StatsSink,
    executor: &'a E,
    reporter: &'a ProgressReporter<'a>,
    ceiling: u32,
}

impl<'a, E: TrajectoryExecutor> DesignLoop<'a, E> {
    pub fn new(
        settings: &'a RunSettings,
        protocol: &'a ProtocolSettings,
        workspace: &'a Workspace,
        stats: &'a StatsSink,
        executor: &'a E,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            settings,
            protocol,
            workspace,
            stats,
            executor,
            reporter,
            ceiling: DEFAULT_SAFETY_CEILING,
        }
    }

    pub fn with_ceiling(mut self, ceiling: u32) -> Self {
        self.ceiling = ceiling;
        self
    }

    #[instrument(skip_all, name = "design_loop")]
    pub fn run(&self, rng: &mut impl Rng) -> Result<RunReport, EngineError> {
        let sampler = AttemptSampler::new(self.settings, self.protocol);
        let mut state = RunState::start();
        let quota = self.settings.number_of_final_designs;

        self.reporter.report(Progress::RunStart { quota });
        info!(quota, ceiling = self.ceiling, "Starting design loop");

        let stop_reason = loop {
            // Termination is decided between iterations; the executor call
            // itself is an opaque blocking step.
            if let Some(reason) = self.stop_reason(&state, quota) {
                break reason;
            }

            let attempt = sampler.sample(rng);
            if self.workspace.trajectory_exists(&attempt.name) {
                // A re-sampled completed name costs nothing: no trial is
                // consumed, which is what makes resumption idempotent.
                debug!(name = %attempt.name, "Trajectory already exists, skipping");
                state.duplicates_skipped += 1;
                self.reporter.report(Progress::DuplicateSkipped {
                    name: attempt.name,
                });
                continue;
            }

            self.reporter.report(Progress::TrajectoryStart {
                name: attempt.name.clone(),
                length: attempt.length,
                seed: attempt.seed,
            });
            info!(
                name = %attempt.name,
                length = attempt.length,
                seed = attempt.seed,
                "Starting trajectory"
            );

            let started = Instant::now();
            let verdict = self.executor.execute(&attempt, self.protocol)?;
            let duration = started.elapsed();

            state.trajectories_attempted += 1;
            self.classify(&attempt, verdict, duration, &mut state)?;
        };

        self.reporter.report(Progress::RunFinish);
        Ok(RunReport::summarize(&state, stop_reason))
    }

    fn stop_reason(&self, state: &RunState, quota: u32) -> Option<StopReason> {
        if state.designs_accepted >= quota {
            return Some(StopReason::QuotaReached);
        }
        if state.trajectories_attempted >= self.ceiling {
            warn!(
                ceiling = self.ceiling,
                "Safety ceiling reached before the quota was met"
            );
            return Some(StopReason::CeilingReached);
        }
        None
    }

    fn classify(
        &self,
        attempt: &Attempt,
        verdict: Verdict,
        duration: Duration,
        state: &mut RunState,
    ) -> Result<(), EngineError> {
        match verdict {
            Verdict::Success {
                metrics,
                sequence,
                terminate_reason: None,
            } => {
                state.designs_accepted += 1;
                info!(
                    name = %attempt.name,
                    accepted = state.designs_accepted,
                    secs = duration.as_secs(),
                    "Trajectory accepted"
                );
                self.stats.append_trajectory(&TrajectoryRecord {
                    design_name: attempt.name.clone(),
                    length: attempt.length,
                    seed: attempt.seed,
                    helicity: attempt.helicity,
                    outcome: "accepted".to_string(),
                    plddt: Some(metrics.plddt),
                    ptm: Some(metrics.ptm),
                    i_ptm: Some(metrics.i_ptm),
                    pae: Some(metrics.pae),
                    i_pae: Some(metrics.i_pae),
                    sequence: Some(sequence),
                    duration_secs: duration.as_secs(),
                })?;
                self.reporter.report(Progress::TrajectoryFinish {
                    name: attempt.name.clone(),
                    accepted: true,
                    reason: None,
                    duration,
                });
            }
            Verdict::Success {
                metrics,
                sequence,
                terminate_reason: Some(reason),
            } => {
                info!(name = %attempt.name, %reason, "Trajectory aborted early");
                self.stats.append_trajectory(&TrajectoryRecord {
                    design_name: attempt.name.clone(),
                    length: attempt.length,
                    seed: attempt.seed,
                    helicity: attempt.helicity,
                    outcome: reason.clone(),
                    plddt: Some(metrics.plddt),
                    ptm: Some(metrics.ptm),
                    i_ptm: Some(metrics.i_ptm),
                    pae: Some(metrics.pae),
                    i_pae: Some(metrics.i_pae),
                    sequence: if sequence.is_empty() {
                        None
                    } else {
                        Some(sequence)
                    },
                    duration_secs: duration.as_secs(),
                })?;
                self.stats.append_failure(&FailureRecord {
                    design_name: attempt.name.clone(),
                    reason: reason.clone(),
                })?;
                self.reporter.report(Progress::TrajectoryFinish {
                    name: attempt.name.clone(),
                    accepted: false,
                    reason: Some(reason),
                    duration,
                });
            }
            Verdict::Failure { reason } => {
                info!(name = %attempt.name, %reason, "Trajectory failed");
                self.stats.append_trajectory(&TrajectoryRecord {
                    design_name: attempt.name.clone(),
                    length: attempt.length,
                    seed: attempt.seed,
                    helicity: attempt.helicity,
                    outcome: "failed".to_string(),
                    plddt: None,
                    ptm: None,
                    i_ptm: None,
                    pae: None,
                    i_pae: None,
                    sequence: None,
                    duration_secs: duration.as_secs(),
                })?;
                self.stats.append_failure(&FailureRecord {
                    design_name: attempt.name.clone(),
                    reason: reason.clone(),
                })?;
                self.reporter.report(Progress::TrajectoryFinish {
                    name: attempt.name.clone(),
                    accepted: false,
                    reason: Some(reason),
                    duration,
                });
            }
        }
        Ok(())
    }
}

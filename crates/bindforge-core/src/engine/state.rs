use std::time::{Duration, Instant};

/// Mutable counters owned exclusively by the acceptance loop.
///
/// A value threaded through one loop, never ambient state: multiple runs can
/// execute in the same process without interference.
#[derive(Debug, Clone)]
pub struct RunState {
    pub trajectories_attempted: u32,
    pub designs_accepted: u32,
    pub duplicates_skipped: u32,
    started: Instant,
}

impl RunState {
    pub fn start() -> Self {
        Self {
            trajectories_attempted: 0,
            designs_accepted: 0,
            duplicates_skipped: 0,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Named terminal state of the acceptance loop. Callers must be able to tell
/// success from exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The accepted-design quota was met.
    QuotaReached,
    /// The hard safety ceiling on attempts was hit before the quota.
    CeilingReached,
}

/// End-of-run aggregate reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub attempted: u32,
    pub accepted: u32,
    pub skipped: u32,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

impl RunReport {
    pub fn summarize(state: &RunState, stop_reason: StopReason) -> Self {
        Self {
            attempted: state.trajectories_attempted,
            accepted: state.designs_accepted,
            skipped: state.duplicates_skipped,
            elapsed: state.elapsed(),
            stop_reason,
        }
    }

    pub fn quota_met(&self) -> bool {
        self.stop_reason == StopReason::QuotaReached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_reads_the_counters() {
        let mut state = RunState::start();
        state.trajectories_attempted = 12;
        state.designs_accepted = 2;
        state.duplicates_skipped = 3;

        let report = RunReport::summarize(&state, StopReason::QuotaReached);
        assert_eq!(report.attempted, 12);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped, 3);
        assert!(report.quota_met());
    }

    #[test]
    fn ceiling_is_distinguishable_from_success() {
        let state = RunState::start();
        let report = RunReport::summarize(&state, StopReason::CeilingReached);
        assert!(!report.quota_met());
        assert_eq!(report.stop_reason, StopReason::CeilingReached);
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sampling::Attempt;
use crate::core::protocol::ProtocolSettings;

/// An unrecoverable executor fault: the collaborator itself is broken in a
/// way it reports as non-retryable. The loop stops immediately and the fault
/// propagates; per-trajectory failures use [`Verdict::Failure`] instead.
#[derive(Debug, Error)]
#[error("Trajectory executor fault: {message}")]
pub struct ExecutorFault {
    message: String,
}

impl ExecutorFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confidence metrics reported by the structure predictor for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub plddt: f64,
    pub ptm: f64,
    pub i_ptm: f64,
    pub pae: f64,
    pub i_pae: f64,
}

/// Classified outcome of one attempt.
///
/// A `Success` with a non-empty `terminate_reason` is an early abort the
/// scheduler counts as non-accepting; `None` denotes a clean completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Success {
        metrics: Metrics,
        sequence: String,
        #[serde(default)]
        terminate_reason: Option<String>,
    },
    Failure {
        reason: String,
    },
}

impl Verdict {
    pub fn is_accepting(&self) -> bool {
        matches!(
            self,
            Verdict::Success {
                terminate_reason: None,
                ..
            }
        )
    }
}

/// The external collaborator boundary behind which all structure generation
/// and scoring lives.
///
/// Implementations must be total (always return, never hang silently), must
/// not touch the loop's run state, and may write artifacts into the
/// workspace's in-flight stages using the attempt name as base identifier.
pub trait TrajectoryExecutor {
    fn execute(
        &self,
        attempt: &Attempt,
        protocol: &ProtocolSettings,
    ) -> Result<Verdict, ExecutorFault>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_success_is_accepting() {
        let verdict = Verdict::Success {
            metrics: Metrics {
                plddt: 85.0,
                ptm: 0.8,
                i_ptm: 0.75,
                pae: 5.0,
                i_pae: 4.5,
            },
            sequence: "MKDLLSR".to_string(),
            terminate_reason: None,
        };
        assert!(verdict.is_accepting());
    }

    #[test]
    fn early_abort_and_failure_are_not_accepting() {
        let aborted = Verdict::Success {
            metrics: Metrics {
                plddt: 40.0,
                ptm: 0.3,
                i_ptm: 0.2,
                pae: 20.0,
                i_pae: 22.0,
            },
            sequence: String::new(),
            terminate_reason: Some("traj_contacts".to_string()),
        };
        assert!(!aborted.is_accepting());

        let failed = Verdict::Failure {
            reason: "predictor crashed".to_string(),
        };
        assert!(!failed.is_accepting());
    }

    #[test]
    fn verdict_json_omits_the_reason_when_clean() {
        let raw = r#"{
            "status": "success",
            "metrics": {"plddt": 85.0, "ptm": 0.8, "i_ptm": 0.75, "pae": 5.0, "i_pae": 4.5},
            "sequence": "MKDLLSR"
        }"#;
        let verdict: Verdict = serde_json::from_str(raw).unwrap();
        assert!(verdict.is_accepting());

        let raw = r#"{"status": "failure", "reason": "clashing backbone"}"#;
        let verdict: Verdict = serde_json::from_str(raw).unwrap();
        assert_eq!(
            verdict,
            Verdict::Failure {
                reason: "clashing backbone".to_string()
            }
        );
    }
}

use bindforge::core::protocol::ProtocolSettings;
use bindforge::core::settings::RunSettings;
use bindforge::engine::executor::{ExecutorFault, TrajectoryExecutor, Verdict};
use bindforge::engine::sampling::Attempt;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// A `TrajectoryExecutor` that runs a configured external predictor command
/// once per attempt.
///
/// Contract: the predictor receives the workspace root and the sampled
/// attempt parameters as arguments, the full protocol settings as JSON on
/// stdin, and prints a JSON verdict on stdout. It writes its own artifacts
/// into the workspace's in-flight stages under the attempt name. A non-zero
/// exit is a recoverable per-trajectory failure; an unreadable verdict or an
/// unrunnable executable is an unrecoverable fault.
pub struct PredictorCommand {
    program: String,
    base_args: Vec<String>,
    design_path: PathBuf,
}

impl PredictorCommand {
    pub fn new(protocol: &ProtocolSettings, settings: &RunSettings) -> Result<Self> {
        let mut parts = protocol.predictor_cmd.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| {
                CliError::Config(
                    "`predictor-cmd` must be set in the protocol file to run designs.".to_string(),
                )
            })?
            .to_string();
        Ok(Self {
            program,
            base_args: parts.map(String::from).collect(),
            design_path: settings.design_path.clone(),
        })
    }
}

impl TrajectoryExecutor for PredictorCommand {
    fn execute(
        &self,
        attempt: &Attempt,
        protocol: &ProtocolSettings,
    ) -> std::result::Result<Verdict, ExecutorFault> {
        info!(name = %attempt.name, program = %self.program, "Invoking predictor");

        let mut child = Command::new(&self.program)
            .args(&self.base_args)
            .arg("--design-path")
            .arg(&self.design_path)
            .arg("--design-name")
            .arg(&attempt.name)
            .arg("--length")
            .arg(attempt.length.to_string())
            .arg("--seed")
            .arg(attempt.seed.to_string())
            .arg("--helicity")
            .arg(attempt.helicity.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ExecutorFault::new(format!(
                        "predictor executable '{}' not found",
                        self.program
                    ))
                } else {
                    ExecutorFault::new(format!(
                        "could not run predictor '{}': {}",
                        self.program, e
                    ))
                }
            })?;

        let payload = serde_json::to_string(protocol).map_err(|e| {
            ExecutorFault::new(format!("could not serialize protocol settings: {}", e))
        })?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes()).map_err(|e| {
                ExecutorFault::new(format!("could not send protocol to predictor: {}", e))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            ExecutorFault::new(format!("predictor '{}' did not finish: {}", self.program, e))
        })?;

        if !output.status.success() {
            let reason = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(name = %attempt.name, status = %output.status, "Predictor reported failure");
            return Ok(Verdict::Failure {
                reason: if reason.is_empty() {
                    format!("predictor exited with {}", output.status)
                } else {
                    reason
                },
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            ExecutorFault::new(format!(
                "predictor returned an unreadable verdict for '{}': {}",
                attempt.name, e
            ))
        })
    }
}

use rand::Rng;
use tracing::{info, instrument};

use crate::core::protocol::ProtocolSettings;
use crate::core::settings::RunSettings;
use crate::core::stats::StatsSink;
use crate::core::workspace::Workspace;
use crate::engine::environment;
use crate::engine::error::EngineError;
use crate::engine::executor::TrajectoryExecutor;
use crate::engine::progress::ProgressReporter;
use crate::engine::scheduler::DesignLoop;
use crate::engine::state::RunReport;

/// Runs one complete design run.
///
/// Environment validation comes first so a broken setup aborts before any
/// workspace mutation. The settings record is persisted once, before the
/// loop, so an interrupted run can be resumed from disk.
#[instrument(skip_all, name = "design_workflow")]
pub fn run<E: TrajectoryExecutor>(
    settings: &RunSettings,
    protocol: &ProtocolSettings,
    executor: &E,
    reporter: &ProgressReporter,
    ceiling: u32,
    rng: &mut impl Rng,
) -> Result<RunReport, EngineError> {
    environment::validate(settings, protocol)?;

    let workspace = Workspace::create(&settings.design_path)?;
    let stats = StatsSink::create(workspace.root())?;

    let record_path = settings.record_path();
    settings.save(&record_path)?;
    info!("Settings persisted to {}", record_path.display());

    let report = DesignLoop::new(settings, protocol, &workspace, &stats, executor, reporter)
        .with_ceiling(ceiling)
        .run(rng)?;

    info!(
        attempted = report.attempted,
        accepted = report.accepted,
        skipped = report.skipped,
        "Design run complete"
    );
    Ok(report)
}

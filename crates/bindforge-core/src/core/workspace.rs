use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to create stage directory '{path}': {source}", path = path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Closed set of workspace categories.
///
/// The directory names are a stable contract consumed by downstream triage
/// and reporting tooling; changing them requires a version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Trajectory,
    TrajectoryRelaxed,
    TrajectoryLowConfidence,
    TrajectoryClashing,
    TrajectoryAnimation,
    TrajectoryPlots,
    Mpnn,
    MpnnRelaxed,
    MpnnBinder,
    Accepted,
    AcceptedRanked,
    AcceptedAnimation,
    AcceptedPlots,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 14] = [
        Stage::Trajectory,
        Stage::TrajectoryRelaxed,
        Stage::TrajectoryLowConfidence,
        Stage::TrajectoryClashing,
        Stage::TrajectoryAnimation,
        Stage::TrajectoryPlots,
        Stage::Mpnn,
        Stage::MpnnRelaxed,
        Stage::MpnnBinder,
        Stage::Accepted,
        Stage::AcceptedRanked,
        Stage::AcceptedAnimation,
        Stage::AcceptedPlots,
        Stage::Rejected,
    ];

    /// Stages where a finished or triaged trajectory artifact can land.
    /// Only these are consulted by the duplicate guard; designs that have
    /// progressed to the final Accepted/Rejected categories were produced
    /// from a trajectory artifact this subset already covers.
    pub const TRAJECTORY_TERMINAL: [Stage; 4] = [
        Stage::Trajectory,
        Stage::TrajectoryRelaxed,
        Stage::TrajectoryLowConfidence,
        Stage::TrajectoryClashing,
    ];

    fn components(self) -> &'static [&'static str] {
        match self {
            Stage::Trajectory => &["Trajectory"],
            Stage::TrajectoryRelaxed => &["Trajectory", "Relaxed"],
            Stage::TrajectoryLowConfidence => &["Trajectory", "LowConfidence"],
            Stage::TrajectoryClashing => &["Trajectory", "Clashing"],
            Stage::TrajectoryAnimation => &["Trajectory", "Animation"],
            Stage::TrajectoryPlots => &["Trajectory", "Plots"],
            Stage::Mpnn => &["MPNN"],
            Stage::MpnnRelaxed => &["MPNN", "Relaxed"],
            Stage::MpnnBinder => &["MPNN", "Binder"],
            Stage::Accepted => &["Accepted"],
            Stage::AcceptedRanked => &["Accepted", "Ranked"],
            Stage::AcceptedAnimation => &["Accepted", "Animation"],
            Stage::AcceptedPlots => &["Accepted", "Plots"],
            Stage::Rejected => &["Rejected"],
        }
    }
}

/// The durable directory layout holding all artifacts for one run.
///
/// The category set is fixed at creation time; each category is an
/// append-only bucket of named artifacts.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates every stage directory under `root`. Idempotent: safe to run
    /// against an existing, partially populated workspace.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let workspace = Self { root: root.into() };
        for stage in Stage::ALL {
            let dir = workspace.stage_dir(stage);
            fs::create_dir_all(&dir).map_err(|source| WorkspaceError::Create {
                path: dir.clone(),
                source,
            })?;
        }
        debug!("Workspace ready at {}", workspace.root.display());
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stage_dir(&self, stage: Stage) -> PathBuf {
        stage
            .components()
            .iter()
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn artifact(&self, stage: Stage, name: &str, extension: &str) -> PathBuf {
        self.stage_dir(stage).join(format!("{}.{}", name, extension))
    }

    /// Duplicate guard: true iff a trajectory artifact with this name exists
    /// in any trajectory-terminal stage. Consulted before the executor runs
    /// so resuming against a partially populated workspace never redoes
    /// completed work.
    pub fn trajectory_exists(&self, name: &str) -> bool {
        Stage::TRAJECTORY_TERMINAL
            .iter()
            .any(|&stage| self.artifact(stage, name, "pdb").is_file())
    }
}

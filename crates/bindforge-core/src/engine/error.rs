use thiserror::Error;

use super::executor::ExecutorFault;
use crate::core::protocol::ProtocolError;
use crate::core::settings::SettingsError;
use crate::core::stats::StatsError;
use crate::core::workspace::WorkspaceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Environment validation failed; missing or not executable: {}", missing.join(", "))]
    Environment { missing: Vec<String> },

    #[error(transparent)]
    Executor(#[from] ExecutorFault),
}

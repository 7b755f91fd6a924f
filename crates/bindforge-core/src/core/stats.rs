use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to write statistics row to '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const TRAJECTORY_COLUMNS: &[&str] = &[
    "design_name",
    "length",
    "seed",
    "helicity",
    "outcome",
    "plddt",
    "ptm",
    "i_ptm",
    "pae",
    "i_pae",
    "sequence",
    "duration_secs",
];

const FAILURE_COLUMNS: &[&str] = &["design_name", "reason"];

// Appended by the downstream redesign and ranking stages; the loop only
// guarantees the files exist with their headers.
const MPNN_COLUMNS: &[&str] = &[
    "design_name", "sequence", "plddt", "ptm", "i_ptm", "pae", "i_pae",
];
const FINAL_COLUMNS: &[&str] = &[
    "rank",
    "design_name",
    "sequence",
    "plddt",
    "ptm",
    "i_ptm",
    "pae",
    "i_pae",
];

/// One row of `trajectory_stats.csv`. Field order must match
/// `TRAJECTORY_COLUMNS`.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryRecord {
    pub design_name: String,
    pub length: u32,
    pub seed: u64,
    pub helicity: f64,
    pub outcome: String,
    pub plddt: Option<f64>,
    pub ptm: Option<f64>,
    pub i_ptm: Option<f64>,
    pub pae: Option<f64>,
    pub i_pae: Option<f64>,
    pub sequence: Option<String>,
    pub duration_secs: u64,
}

/// One row of `failure_stats.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub design_name: String,
    pub reason: String,
}

/// The persisted per-run statistics files at the workspace root.
///
/// Creation is idempotent: headers are written once and existing rows are
/// preserved so a resumed run keeps appending to the same audit trail.
#[derive(Debug, Clone)]
pub struct StatsSink {
    trajectory_path: PathBuf,
    failure_path: PathBuf,
}

impl StatsSink {
    pub fn create(root: &Path) -> Result<Self, StatsError> {
        let trajectory_path = root.join("trajectory_stats.csv");
        let failure_path = root.join("failure_stats.csv");

        init_with_header(&trajectory_path, TRAJECTORY_COLUMNS)?;
        init_with_header(&failure_path, FAILURE_COLUMNS)?;
        init_with_header(&root.join("mpnn_design_stats.csv"), MPNN_COLUMNS)?;
        init_with_header(&root.join("final_design_stats.csv"), FINAL_COLUMNS)?;

        Ok(Self {
            trajectory_path,
            failure_path,
        })
    }

    pub fn append_trajectory(&self, record: &TrajectoryRecord) -> Result<(), StatsError> {
        append_row(&self.trajectory_path, record)
    }

    pub fn append_failure(&self, record: &FailureRecord) -> Result<(), StatsError> {
        append_row(&self.failure_path, record)
    }
}

fn init_with_header(path: &Path, columns: &[&str]) -> Result<(), StatsError> {
    let already_initialized = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    if already_initialized {
        return Ok(());
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(columns)
        .map_err(|source| StatsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush()?;
    Ok(())
}

fn append_row<T: Serialize>(path: &Path, record: &T) -> Result<(), StatsError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(record).map_err(|source| StatsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush()?;
    Ok(())
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{field}' is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Settings file not found: {path}", path = path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed settings record in '{path}': {source}", path = path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inclusive range of binder lengths the sampler may draw from.
///
/// Invariant: `0 < min <= max`. Serializes as a 2-element array so the
/// persisted record stays a flat field-keyed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct LengthRange {
    min: u32,
    max: u32,
}

impl LengthRange {
    pub fn new(min: u32, max: u32) -> Result<Self, SettingsError> {
        if min == 0 {
            return Err(SettingsError::Invalid {
                field: "lengths",
                reason: "binder lengths must be positive".to_string(),
            });
        }
        if min > max {
            return Err(SettingsError::Invalid {
                field: "lengths",
                reason: format!("minimum length {} exceeds maximum length {}", min, max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl TryFrom<[u32; 2]> for LengthRange {
    type Error = SettingsError;

    fn try_from(pair: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(pair[0], pair[1])
    }
}

impl From<LengthRange> for [u32; 2] {
    fn from(range: LengthRange) -> Self {
        [range.min, range.max]
    }
}

/// Identity and scope of one design run.
///
/// Immutable once a run starts; persisted once at run start as
/// `<design_path>/<binder_name>.json` and never mutated thereafter. The
/// serialized field names and representations are a stable contract consumed
/// by downstream triage and reporting tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    pub design_path: PathBuf,
    pub binder_name: String,
    pub starting_pdb: PathBuf,
    #[serde(with = "chain_list")]
    pub chains: Vec<String>,
    #[serde(with = "hotspot_list")]
    pub target_hotspot_residues: Option<String>,
    pub lengths: LengthRange,
    pub number_of_final_designs: u32,
}

impl RunSettings {
    pub fn builder() -> RunSettingsBuilder {
        RunSettingsBuilder::new()
    }

    /// Canonical location of the persisted record for this run.
    pub fn record_path(&self) -> PathBuf {
        self.design_path.join(format!("{}.json", self.binder_name))
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let record =
            serde_json::to_string_pretty(self).map_err(|source| SettingsError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, record)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The `chains` record field is a comma-joined string of chain identifiers;
/// in memory the ordering is kept as an explicit list.
mod chain_list {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(chains: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&chains.join(","))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let chains: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if chains.is_empty() {
            return Err(D::Error::custom("field `chains` must name at least one chain"));
        }
        Ok(chains)
    }
}

/// `target_hotspot_residues` is recorded as a plain string, empty when no
/// hotspots are requested.
mod hotspot_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        hotspots: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(hotspots.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.is_empty() { None } else { Some(raw) })
    }
}

#[derive(Default)]
pub struct RunSettingsBuilder {
    design_path: Option<PathBuf>,
    binder_name: Option<String>,
    starting_pdb: Option<PathBuf>,
    chains: Vec<String>,
    target_hotspot_residues: Option<String>,
    lengths: Option<(u32, u32)>,
    number_of_final_designs: Option<u32>,
}

impl RunSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn design_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.design_path = Some(path.into());
        self
    }
    pub fn binder_name(mut self, name: impl Into<String>) -> Self {
        self.binder_name = Some(name.into());
        self
    }
    pub fn starting_pdb(mut self, path: impl Into<PathBuf>) -> Self {
        self.starting_pdb = Some(path.into());
        self
    }
    pub fn chains(mut self, chains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.chains = chains.into_iter().map(Into::into).collect();
        self
    }
    pub fn hotspot_residues(mut self, residues: impl Into<String>) -> Self {
        self.target_hotspot_residues = Some(residues.into());
        self
    }
    pub fn lengths(mut self, min: u32, max: u32) -> Self {
        self.lengths = Some((min, max));
        self
    }
    pub fn quota(mut self, n: u32) -> Self {
        self.number_of_final_designs = Some(n);
        self
    }

    pub fn build(self) -> Result<RunSettings, SettingsError> {
        let design_path = self
            .design_path
            .ok_or(SettingsError::MissingParameter("design_path"))?;
        let binder_name = self
            .binder_name
            .ok_or(SettingsError::MissingParameter("binder_name"))?;
        if binder_name.is_empty() {
            return Err(SettingsError::Invalid {
                field: "binder_name",
                reason: "binder name must not be empty".to_string(),
            });
        }
        let starting_pdb = self
            .starting_pdb
            .ok_or(SettingsError::MissingParameter("starting_pdb"))?;
        if starting_pdb.as_os_str().is_empty() {
            return Err(SettingsError::Invalid {
                field: "starting_pdb",
                reason: "target structure path must not be empty".to_string(),
            });
        }
        if self.chains.is_empty() {
            return Err(SettingsError::Invalid {
                field: "chains",
                reason: "at least one target chain is required".to_string(),
            });
        }
        let (min, max) = self
            .lengths
            .ok_or(SettingsError::MissingParameter("lengths"))?;
        let quota = self
            .number_of_final_designs
            .ok_or(SettingsError::MissingParameter("number_of_final_designs"))?;
        if quota < 1 {
            return Err(SettingsError::Invalid {
                field: "number_of_final_designs",
                reason: "at least one accepted design must be requested".to_string(),
            });
        }
        Ok(RunSettings {
            design_path,
            binder_name,
            starting_pdb,
            chains: self.chains,
            target_hotspot_residues: self.target_hotspot_residues,
            lengths: LengthRange::new(min, max)?,
            number_of_final_designs: quota,
        })
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Protocol file not found: {path}", path = path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to parse protocol file '{path}': {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunable knobs for the external predictor and the downstream redesign and
/// relaxation stages.
///
/// The scheduler treats this as an opaque bag: nothing here is read by the
/// acceptance loop itself except the helicity sampling switch; everything is
/// handed to the `TrajectoryExecutor` unexamined. `Default` is the documented
/// baseline; a TOML file may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProtocolSettings {
    // Protocol selection
    pub design_protocol: String,
    pub interface_protocol: String,
    pub template_protocol: String,

    // Amino-acid restrictions
    pub omit_amino_acids: String,
    pub force_reject_amino_acids: bool,

    // Model settings
    pub use_multimer_design: bool,
    pub design_algorithm: String,
    pub sample_models: bool,

    // Iteration schedule
    pub soft_iterations: u32,
    pub temporary_iterations: u32,
    pub hard_iterations: u32,
    pub greedy_iterations: u32,
    pub greedy_percentage: u32,

    // Loss weights
    pub weights_plddt: f64,
    pub weights_pae_intra: f64,
    pub weights_pae_inter: f64,
    pub weights_con_intra: f64,
    pub weights_con_inter: f64,
    pub weights_helicity: f64,
    pub weights_iptm: f64,
    pub weights_rg: f64,
    pub weights_termini_loss: f64,

    // Contact definitions
    pub intra_contact_distance: f64,
    pub inter_contact_distance: f64,
    pub intra_contact_number: u32,
    pub inter_contact_number: u32,

    // Loss toggles
    pub random_helicity: bool,
    pub use_iptm_loss: bool,
    pub use_rg_loss: bool,
    pub use_termini_distance_loss: bool,

    // Sequence redesign (MPNN stage)
    pub enable_mpnn: bool,
    pub mpnn_fix_interface: bool,
    pub mpnn_sequences: u32,
    pub max_mpnn_sequences: u32,
    pub mpnn_sampling_temp: f64,
    pub mpnn_backbone_noise: f64,
    pub mpnn_model: String,
    pub mpnn_weights: String,
    pub save_mpnn_fasta: bool,

    // Structure prediction recycling
    pub num_recycles_design: u32,
    pub num_recycles_validation: u32,

    // File retention
    pub save_design_animations: bool,
    pub save_design_trajectory_plots: bool,
    pub remove_unrelaxed_trajectory: bool,
    pub remove_unrelaxed_complex: bool,
    pub remove_binder_monomer: bool,
    pub zip_animations: bool,
    pub zip_plots: bool,

    // Acceptance-rate monitoring
    pub enable_rejection_check: bool,
    pub acceptance_rate: f64,
    pub start_monitoring: u32,

    // External tools
    pub predictor_cmd: String,
    pub af_params_dir: String,
    pub dssp_path: String,
    pub dalphaball_path: String,
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self {
            design_protocol: "Default".to_string(),
            interface_protocol: "AlphaFold2".to_string(),
            template_protocol: "Default".to_string(),

            omit_amino_acids: "C".to_string(),
            force_reject_amino_acids: false,

            use_multimer_design: true,
            design_algorithm: "4stage".to_string(),
            sample_models: true,

            soft_iterations: 75,
            temporary_iterations: 45,
            hard_iterations: 5,
            greedy_iterations: 15,
            greedy_percentage: 1,

            weights_plddt: 0.1,
            weights_pae_intra: 0.4,
            weights_pae_inter: 0.1,
            weights_con_intra: 1.0,
            weights_con_inter: 1.0,
            weights_helicity: -0.3,
            weights_iptm: 0.05,
            weights_rg: 0.3,
            weights_termini_loss: 0.1,

            intra_contact_distance: 14.0,
            inter_contact_distance: 20.0,
            intra_contact_number: 2,
            inter_contact_number: 2,

            random_helicity: false,
            use_iptm_loss: true,
            use_rg_loss: true,
            use_termini_distance_loss: false,

            enable_mpnn: true,
            mpnn_fix_interface: true,
            mpnn_sequences: 20,
            max_mpnn_sequences: 2,
            mpnn_sampling_temp: 0.1,
            mpnn_backbone_noise: 0.0,
            mpnn_model: "v_48_020".to_string(),
            mpnn_weights: "soluble".to_string(),
            save_mpnn_fasta: false,

            num_recycles_design: 1,
            num_recycles_validation: 3,

            save_design_animations: true,
            save_design_trajectory_plots: true,
            remove_unrelaxed_trajectory: true,
            remove_unrelaxed_complex: true,
            remove_binder_monomer: true,
            zip_animations: true,
            zip_plots: true,

            enable_rejection_check: true,
            acceptance_rate: 0.01,
            start_monitoring: 600,

            predictor_cmd: String::new(),
            af_params_dir: String::new(),
            dssp_path: String::new(),
            dalphaball_path: String::new(),
        }
    }
}

impl ProtocolSettings {
    /// Loads protocol overrides from a TOML file; unspecified fields keep
    /// their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ProtocolError> {
        if !path.exists() {
            return Err(ProtocolError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ProtocolError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_round_trip_through_toml() {
        let defaults = ProtocolSettings::default();
        let rendered = toml::to_string(&defaults).unwrap();
        let parsed: ProtocolSettings = toml::from_str(&rendered).unwrap();
        assert_eq!(defaults, parsed);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("protocol.toml");
        std::fs::write(&path, "").unwrap();

        let parsed = ProtocolSettings::from_file(&path).unwrap();
        assert_eq!(parsed, ProtocolSettings::default());
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("protocol.toml");
        std::fs::write(
            &path,
            r#"
            soft-iterations = 100
            random-helicity = true
            predictor-cmd = "/opt/predictor/run"
            "#,
        )
        .unwrap();

        let parsed = ProtocolSettings::from_file(&path).unwrap();
        assert_eq!(parsed.soft_iterations, 100);
        assert!(parsed.random_helicity);
        assert_eq!(parsed.predictor_cmd, "/opt/predictor/run");
        // Untouched knobs keep the baseline.
        assert_eq!(parsed.hard_iterations, 5);
        assert_eq!(parsed.weights_helicity, -0.3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("protocol.toml");
        std::fs::write(&path, "soft-iteration-count = 10\n").unwrap();

        assert!(matches!(
            ProtocolSettings::from_file(&path),
            Err(ProtocolError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            ProtocolSettings::from_file(&dir.path().join("absent.toml")),
            Err(ProtocolError::NotFound { .. })
        ));
    }
}

use crate::cli::{ConfigArgs, ConfigCommands, SettingsArgs};
use crate::error::Result;
use bindforge::core::settings::RunSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Create { settings, output } => create(&settings, output),
        ConfigCommands::Validate { file } => validate(&file),
    }
}

fn create(args: &SettingsArgs, output: Option<PathBuf>) -> Result<()> {
    let settings = super::design::settings_from_args(args)?;
    let output = output.unwrap_or_else(|| settings.record_path());

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    settings.save(&output)?;

    info!("Settings record written to {}", output.display());
    println!("Settings written to {}", output.display());
    Ok(())
}

fn validate(file: &Path) -> Result<()> {
    let settings = RunSettings::load(file)?;

    println!("✓ Settings file {} is valid", file.display());
    println!("  Binder name:   {}", settings.binder_name);
    println!("  Starting PDB:  {}", settings.starting_pdb.display());
    println!("  Target chains: {}", settings.chains.join(","));
    println!(
        "  Length range:  {}-{}",
        settings.lengths.min(),
        settings.lengths.max()
    );
    println!("  Quota:         {}", settings.number_of_final_designs);

    if !settings.starting_pdb.is_file() {
        println!(
            "⚠ Warning: starting PDB not found: {}",
            settings.starting_pdb.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use bindforge::core::settings::SettingsError;
    use tempfile::tempdir;

    fn settings_args(design_path: &Path) -> SettingsArgs {
        SettingsArgs {
            design_path: Some(design_path.to_path_buf()),
            binder_name: Some("pdl1".to_string()),
            starting_pdb: Some("/data/pdl1.pdb".into()),
            chains: "A".to_string(),
            target_hotspot_residues: "A56,A115".to_string(),
            min_length: 30,
            max_length: 110,
            number_of_designs: 2,
        }
    }

    #[test]
    fn create_then_validate_round_trips() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("designs");

        create(&settings_args(&root), None).unwrap();

        let record = root.join("pdl1.json");
        assert!(record.is_file());
        assert!(validate(&record).is_ok());

        let loaded = RunSettings::load(&record).unwrap();
        assert_eq!(loaded.binder_name, "pdl1");
        assert_eq!(loaded.target_hotspot_residues.as_deref(), Some("A56,A115"));
    }

    #[test]
    fn create_honors_an_explicit_output_path() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("elsewhere").join("run.json");

        create(&settings_args(&dir.path().join("designs")), Some(output.clone())).unwrap();
        assert!(output.is_file());
    }

    #[test]
    fn validate_rejects_a_missing_file() {
        let dir = tempdir().unwrap();
        let result = validate(&dir.path().join("absent.json"));
        assert!(matches!(
            result,
            Err(CliError::Settings(SettingsError::NotFound { .. }))
        ));
    }
}

use std::path::Path;
use tracing::{debug, info};

use super::error::EngineError;
use crate::core::protocol::ProtocolSettings;
use crate::core::settings::RunSettings;

/// Checks that the target structure and every configured external tool are
/// present before the loop starts. Consulted once per run; on failure the
/// run aborts before any workspace mutation.
pub fn validate(settings: &RunSettings, protocol: &ProtocolSettings) -> Result<(), EngineError> {
    info!("Validating environment");
    let mut missing = Vec::new();

    if !settings.starting_pdb.is_file() {
        missing.push(format!(
            "starting PDB '{}'",
            settings.starting_pdb.display()
        ));
    }

    for (label, path) in [
        ("dssp", protocol.dssp_path.as_str()),
        ("dalphaball", protocol.dalphaball_path.as_str()),
    ] {
        // Tool paths are optional knobs; only configured ones are required.
        if path.is_empty() {
            debug!("{} path not configured, skipping check", label);
            continue;
        }
        if !is_executable(Path::new(path)) {
            missing.push(format!("{} '{}'", label, path));
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Environment { missing })
    }
}

pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings_with_pdb(pdb: &Path) -> RunSettings {
        RunSettings::builder()
            .design_path("/tmp/d")
            .binder_name("binder")
            .starting_pdb(pdb)
            .chains(["A"])
            .lengths(30, 110)
            .quota(1)
            .build()
            .unwrap()
    }

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn passes_with_existing_pdb_and_no_tools_configured() {
        let dir = tempdir().unwrap();
        let pdb = dir.path().join("target.pdb");
        fs::write(&pdb, "ATOM").unwrap();

        let settings = settings_with_pdb(&pdb);
        assert!(validate(&settings, &ProtocolSettings::default()).is_ok());
    }

    #[test]
    fn missing_pdb_is_reported_by_name() {
        let dir = tempdir().unwrap();
        let settings = settings_with_pdb(&dir.path().join("absent.pdb"));

        let result = validate(&settings, &ProtocolSettings::default());
        match result {
            Err(EngineError::Environment { missing }) => {
                assert_eq!(missing.len(), 1);
                assert!(missing[0].contains("absent.pdb"));
            }
            other => panic!("expected environment error, got {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn configured_tools_must_be_executable() {
        let dir = tempdir().unwrap();
        let pdb = dir.path().join("target.pdb");
        fs::write(&pdb, "ATOM").unwrap();

        let dssp = dir.path().join("mkdssp");
        fs::write(&dssp, "not executable").unwrap();

        let settings = settings_with_pdb(&pdb);
        let protocol = ProtocolSettings {
            dssp_path: dssp.to_string_lossy().into_owned(),
            ..ProtocolSettings::default()
        };

        let result = validate(&settings, &protocol);
        match result {
            Err(EngineError::Environment { missing }) => {
                assert!(missing[0].contains("dssp"));
            }
            other => panic!("expected environment error, got {:?}", other),
        }

        make_executable(&dssp);
        assert!(validate(&settings, &protocol).is_ok());
    }
}

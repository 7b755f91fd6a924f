use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use bindforge::engine::environment::is_executable;
use std::path::Path;

pub fn run(args: CheckArgs) -> Result<()> {
    let protocol = super::load_protocol(args.protocol.as_deref())?;

    println!("Checking external tool availability...");

    let tools = [
        ("predictor", predictor_program(&protocol.predictor_cmd)),
        ("dssp", protocol.dssp_path.clone()),
        ("dalphaball", protocol.dalphaball_path.clone()),
    ];

    let mut missing = Vec::new();
    for (label, path) in &tools {
        if path.is_empty() {
            println!("- {}: not configured", label);
            continue;
        }
        if is_executable(Path::new(path)) {
            println!("✓ {}: {}", label, path);
        } else {
            println!("✗ {}: {} (missing or not executable)", label, path);
            missing.push(*label);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::Config(format!(
            "unavailable tools: {}",
            missing.join(", ")
        )))
    }
}

fn predictor_program(predictor_cmd: &str) -> String {
    predictor_cmd
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predictor_program_strips_arguments() {
        assert_eq!(
            predictor_program("/opt/predictor/run --gpu 0"),
            "/opt/predictor/run"
        );
        assert_eq!(predictor_program(""), "");
    }

    #[test]
    fn unconfigured_tools_pass_the_check() {
        assert!(run(CheckArgs { protocol: None }).is_ok());
    }
}

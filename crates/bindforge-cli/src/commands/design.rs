use crate::cli::{DesignArgs, SettingsArgs};
use crate::error::{CliError, Result};
use crate::executor::PredictorCommand;
use crate::progress::CliProgressHandler;
use bindforge::core::settings::RunSettings;
use bindforge::engine::progress::ProgressReporter;
use bindforge::engine::state::{RunReport, StopReason};
use bindforge::workflows;
use std::time::Duration;
use tracing::info;

pub fn run(args: DesignArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let protocol = super::load_protocol(args.protocol.as_deref())?;
    let executor = PredictorCommand::new(&protocol, &settings)?;

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.callback());

    println!(
        "Starting binder design run '{}' against {}",
        settings.binder_name,
        settings.starting_pdb.display()
    );
    info!("Invoking the design workflow...");

    let mut rng = rand::thread_rng();
    let report = workflows::design::run(
        &settings,
        &protocol,
        &executor,
        &reporter,
        args.ceiling,
        &mut rng,
    )?;

    render_summary(&report);
    Ok(())
}

fn resolve_settings(args: &DesignArgs) -> Result<RunSettings> {
    if let Some(path) = &args.config {
        let settings = RunSettings::load(path)?;
        info!("Loaded run settings from {}", path.display());
        Ok(settings)
    } else {
        settings_from_args(&args.settings)
    }
}

pub(crate) fn settings_from_args(args: &SettingsArgs) -> Result<RunSettings> {
    let design_path = args.design_path.clone().ok_or_else(|| {
        CliError::Config("--design-path is required when no --config file is given.".to_string())
    })?;
    let binder_name = args.binder_name.clone().ok_or_else(|| {
        CliError::Config("--binder-name is required when no --config file is given.".to_string())
    })?;
    let starting_pdb = args.starting_pdb.clone().ok_or_else(|| {
        CliError::Config("--starting-pdb is required when no --config file is given.".to_string())
    })?;

    let mut builder = RunSettings::builder()
        .design_path(design_path)
        .binder_name(binder_name)
        .starting_pdb(starting_pdb)
        .chains(
            args.chains
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
        )
        .lengths(args.min_length, args.max_length)
        .quota(args.number_of_designs);
    if !args.target_hotspot_residues.is_empty() {
        builder = builder.hotspot_residues(&args.target_hotspot_residues);
    }
    builder.build().map_err(CliError::from)
}

fn render_summary(report: &RunReport) {
    println!("==================================================");
    match report.stop_reason {
        StopReason::QuotaReached => println!("Design run complete: quota reached."),
        StopReason::CeilingReached => {
            println!("Design run stopped: safety ceiling reached before the quota was met.");
        }
    }
    println!("Trajectories attempted: {}", report.attempted);
    println!("Duplicates skipped:     {}", report.skipped);
    println!("Accepted designs:       {}", report.accepted);
    println!("Total time: {}", format_elapsed(report.elapsed));
    println!("==================================================");
}

pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{} hours, {} minutes, {} seconds",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

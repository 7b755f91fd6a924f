use bindforge::engine::scheduler::DEFAULT_SAFETY_CEILING;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Bindforge Developers",
    version,
    about = "Bindforge CLI - orchestrates iterative, stochastic de novo binder design against a fixed target structure.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the binder design loop until the accepted-design quota is met.
    Design(DesignArgs),
    /// Create or validate run settings files.
    Config(ConfigArgs),
    /// Check that the required external tools are present and executable.
    Check(CheckArgs),
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Load run settings from a JSON file instead of individual flags.
    #[arg(
        short,
        long,
        value_name = "PATH",
        conflicts_with_all = ["design_path", "binder_name", "starting_pdb"]
    )]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Path to a TOML file overriding the default protocol parameters.
    #[arg(long, value_name = "PATH")]
    pub protocol: Option<PathBuf>,

    /// Hard upper bound on executed trajectories before the run stops.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_SAFETY_CEILING)]
    pub ceiling: u32,
}

/// Run-settings parameters shared by `design` and `config create`.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Directory that will hold the run workspace.
    #[arg(long, value_name = "PATH")]
    pub design_path: Option<PathBuf>,

    /// Name prefix for generated binder designs.
    #[arg(long, value_name = "NAME")]
    pub binder_name: Option<String>,

    /// Path to the target PDB structure.
    #[arg(long, value_name = "PATH")]
    pub starting_pdb: Option<PathBuf>,

    /// Target chains, comma-separated.
    #[arg(long, value_name = "CHAINS", default_value = "A")]
    pub chains: String,

    /// Target hotspot residues (empty searches the whole interface).
    #[arg(long, value_name = "RESIDUES", default_value = "")]
    pub target_hotspot_residues: String,

    /// Minimum binder length to sample.
    #[arg(long, value_name = "INT", default_value_t = 30)]
    pub min_length: u32,

    /// Maximum binder length to sample.
    #[arg(long, value_name = "INT", default_value_t = 110)]
    pub max_length: u32,

    /// Number of accepted designs that completes the run.
    #[arg(long, value_name = "INT", default_value_t = 2)]
    pub number_of_designs: u32,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a run settings JSON file from the given parameters.
    Create {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Output path (defaults to <design-path>/<binder-name>.json).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Load a settings file and report whether it is usable.
    Validate {
        /// Settings file to check.
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Protocol TOML whose tool paths should be checked.
    #[arg(long, value_name = "PATH")]
    pub protocol: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_accepts_explicit_settings_flags() {
        let cli = Cli::parse_from([
            "bindforge",
            "design",
            "--design-path",
            "/tmp/designs",
            "--binder-name",
            "pdl1",
            "--starting-pdb",
            "/data/pdl1.pdb",
            "--chains",
            "A,B",
            "--min-length",
            "40",
            "--max-length",
            "90",
            "--number-of-designs",
            "3",
        ]);

        let Commands::Design(args) = cli.command else {
            panic!("expected design subcommand");
        };
        assert_eq!(args.settings.binder_name.as_deref(), Some("pdl1"));
        assert_eq!(args.settings.chains, "A,B");
        assert_eq!(args.settings.min_length, 40);
        assert_eq!(args.settings.number_of_designs, 3);
        assert_eq!(args.ceiling, DEFAULT_SAFETY_CEILING);
    }

    #[test]
    fn design_config_conflicts_with_explicit_flags() {
        let result = Cli::try_parse_from([
            "bindforge",
            "design",
            "--config",
            "/tmp/run.json",
            "--binder-name",
            "pdl1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["bindforge", "design", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_create_and_validate_parse() {
        let cli = Cli::parse_from([
            "bindforge",
            "config",
            "create",
            "--design-path",
            "/tmp/designs",
            "--binder-name",
            "pdl1",
            "--starting-pdb",
            "/data/pdl1.pdb",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                command: ConfigCommands::Create { .. }
            })
        ));

        let cli = Cli::parse_from(["bindforge", "config", "validate", "/tmp/run.json"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                command: ConfigCommands::Validate { .. }
            })
        ));
    }
}

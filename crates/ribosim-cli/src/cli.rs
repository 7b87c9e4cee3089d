use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "RiboSim CLI - A command-line driver for RiboSim, a discrete-time simulation of ribosomes translating mRNA into proteins.",
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
    /// Build a translation model, simulate it, and print the consolidated trajectory.
    Run(RunArgs),
    /// Print the default configuration file.
    Defaults(DefaultsArgs),
}

/// Output encodings for the simulation result.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Toml,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the result to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output encoding of the result.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    // --- Model Overrides ---
    /// Override the number of ribosomes.
    #[arg(short, long, value_name = "INT")]
    pub ribosomes: Option<usize>,

    /// Override the number of initial mRNA strands.
    #[arg(short, long, value_name = "INT")]
    pub mrnas: Option<usize>,

    /// Override the nucleotide sequence carried by every initial mRNA.
    #[arg(long, value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    // --- Simulation Overrides ---
    /// Override the number of steps to simulate.
    #[arg(short = 'n', long, value_name = "INT")]
    pub steps: Option<u64>,

    /// Do not record a trajectory; only final entity counts are reported.
    #[arg(long)]
    pub no_log: bool,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S simulation.steps=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `defaults` subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Write the configuration to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

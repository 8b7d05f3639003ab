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
    author = "molopt developers",
    version,
    about = "molopt CLI - gradient-free SPSA relaxation of bonded molecular systems described in TOML job files.",
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
    /// Print the bonded energy breakdown of the system in a job file.
    Energy(EnergyArgs),
    /// Relax the geometry of the system in a job file with SPSA.
    Relax(RelaxArgs),
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Path to the job description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,
}

/// Arguments for the `relax` subcommand.
#[derive(Args, Debug)]
pub struct RelaxArgs {
    // --- Core Arguments ---
    /// Path to the job description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the relaxed system, written in the job file format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    // --- SPSA Overrides ---
    /// Override the number of SPSA iterations.
    #[arg(short = 'n', long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Override the random seed used for perturbations and noise.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the step-size numerator `a`.
    #[arg(short = 'a', long = "step-size", value_name = "FLOAT")]
    pub a: Option<f64>,

    /// Override the perturbation-size numerator `c`.
    #[arg(long = "perturbation-size", value_name = "FLOAT")]
    pub c: Option<f64>,

    // --- Objective Overrides ---
    /// Override the standard deviation of the Gaussian energy noise.
    #[arg(long, value_name = "FLOAT")]
    pub noise: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S spsa.big-a=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

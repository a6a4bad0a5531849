use clap::Parser;
use std::path::PathBuf;

use sepexplorer::Gas;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (can be repeated: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (can be repeated: -q for warn, -qq for error)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Dataset JSON file
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,

    #[arg(
        long = "dataset",
        value_name = "FILE",
        help = "Dataset JSON file (same as the positional argument)",
        conflicts_with = "dataset"
    )]
    pub dataset_flag: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory with one JSON file per isotherm reference"
    )]
    pub isotherms: Option<PathBuf>,

    #[arg(long, short = 'c', value_name = "FILE", help = "YAML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "GAS", help = "Gas on the x axes")]
    pub gas1: Option<Gas>,

    #[arg(long, value_name = "GAS", help = "Gas on the y axes")]
    pub gas2: Option<Gas>,
}

impl Cli {
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset.clone().or_else(|| self.dataset_flag.clone())
    }

    /// Default log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match i16::from(self.verbose) - i16::from(self.quiet) {
            i16::MIN..=-2 => "error",
            -1 => "warn",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

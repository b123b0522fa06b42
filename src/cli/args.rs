use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pathsim", version, about = "Pathway perturbation simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file (defaults to ./pathsim.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a knockout or overexpression and compare before/after metrics
    Simulate {
        /// Pathway JSON file with `nodes` and `edges` arrays
        file: PathBuf,
        /// Perturbation type: knockout or overexpression
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        kind: String,
        /// Target node id
        #[arg(long, short)]
        node: String,
        /// Override the configured overexpression multiplier
        #[arg(long)]
        multiplier: Option<f64>,
        /// Merge an offline interpretation into the JSON analysis
        #[arg(long)]
        interpret: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print structural metrics of a pathway without perturbing it
    Metrics {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

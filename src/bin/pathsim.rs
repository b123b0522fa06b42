// src/bin/pathsim.rs
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pathsim_core::cli::handlers::SimulateRequest;
use pathsim_core::cli::{self, Cli, Commands};
use pathsim_core::config::Config;
use pathsim_core::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = load_config(&cli)?;
    let output = dispatch(&cli.command, &config)?;
    print!("{output}");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::load()?),
    }
}

fn dispatch(cmd: &Commands, config: &Config) -> Result<String> {
    match cmd {
        Commands::Simulate {
            file,
            kind,
            node,
            multiplier,
            interpret,
            format,
        } => {
            let req = SimulateRequest {
                file,
                kind,
                node,
                multiplier: *multiplier,
                interpret: *interpret,
                format: *format,
            };
            cli::handle_simulate(&req, config)
        }
        Commands::Metrics { file, format } => cli::handle_metrics(file, *format, config),
    }
}

// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, OutputFormat};
pub use handlers::{handle_metrics, handle_simulate, read_pathway};

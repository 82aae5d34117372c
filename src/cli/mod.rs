//! CLI module for flatdb
//!
//! Provides command-line interface for:
//! - init: Create the data directory and empty collection files
//! - serve: Start the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

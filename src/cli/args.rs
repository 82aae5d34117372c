//! CLI argument definitions using clap
//!
//! Commands:
//! - flatdb init [--config <path>] [--data-dir <dir>]
//! - flatdb serve [--config <path>] [--host <host>] [--port <port>] [--data-dir <dir>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flatdb - CRUD over flat JSON collection files
#[derive(Parser, Debug)]
#[command(name = "flatdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and empty collection files
    Init {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the collection files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Directory holding the collection files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["flatdb", "serve", "--port", "8080", "--data-dir", "/tmp/d"]);
        match cli.command {
            Command::Serve {
                config,
                host,
                port,
                data_dir,
            } => {
                assert!(config.is_none());
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
                assert_eq!(data_dir, Some(PathBuf::from("/tmp/d")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["flatdb", "init", "--config", "flatdb.json"]);
        assert!(matches!(
            cli.command,
            Command::Init { config: Some(_), data_dir: None }
        ));
    }
}

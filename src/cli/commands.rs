//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::Logger;
use crate::storage::{self, document_of, CollectionKind};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Load configuration from `path`, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> CliResult<ServerConfig> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&content)
                .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?
        }
        None => ServerConfig::default(),
    };

    config.validate().map_err(CliError::config_error)?;
    Ok(config)
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, data_dir } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            init(&config).map(|_| ())
        }
        Command::Serve {
            config,
            host,
            port,
            data_dir,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            config.validate().map_err(CliError::config_error)?;
            serve(config)
        }
    }
}

/// Create the data directory and an empty document for each missing
/// collection file. Existing files are left untouched.
///
/// Returns the files that were created.
pub fn init(config: &ServerConfig) -> CliResult<Vec<PathBuf>> {
    fs::create_dir_all(&config.data_dir).map_err(|e| {
        CliError::io_error(format!(
            "Failed to create data directory {}: {}",
            config.data_dir.display(),
            e
        ))
    })?;

    let mut created = Vec::new();
    for kind in CollectionKind::ALL {
        let path = config.collection_path(kind);
        if path.exists() {
            continue;
        }
        storage::save(&path, &document_of(kind, Vec::new()))?;
        created.push(path);
    }

    let data_dir = config.data_dir.display().to_string();
    let created_count = created.len().to_string();
    Logger::info(
        "DATA_DIR_INITIALIZED",
        &[("data_dir", data_dir.as_str()), ("created", created_count.as_str())],
    );

    Ok(created)
}

/// Start the HTTP server and block until it stops
pub fn serve(config: ServerConfig) -> CliResult<()> {
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

//! CLI command implementations

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::errors::RecordError;
use crate::http_server::HttpServer;
use crate::mutation::MutationEngine;
use crate::observability;
use crate::query::QueryEngine;
use crate::record::Record;
use crate::scope::Scope;

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Export { config } => {
            let config = Config::load_or_default(config.as_deref())?;
            init_logging(&config);
            let mut stdout = io::stdout();
            export(&config, &mut stdout)
        }
        Command::Import { config, input } => {
            let config = Config::load_or_default(config.as_deref())?;
            init_logging(&config);
            let summary = import(&config, &input)?;
            let mut stdout = io::stdout();
            serde_json::to_writer(&mut stdout, &summary)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

fn init_logging(config: &Config) {
    // A subscriber may already be installed when embedded; keep it.
    let _ = observability::init(&config.log_level);
}

/// Serve the record API until the server stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    init_logging(&config);

    let store = config.open_store()?;
    let server = HttpServer::new(config.server.clone(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Write every stored record as a JSON array
pub fn export<W: Write>(config: &Config, out: &mut W) -> CliResult<()> {
    let store = config.open_store()?;
    let records = QueryEngine::new(store).list_all(&Scope::Global)?;

    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    out.flush()?;

    tracing::info!(event = "RECORDS_EXPORTED", count = records.len());
    Ok(())
}

/// Add every record in `input` through the mutation engine. Existing keys
/// are skipped; any other rejection aborts the run.
pub fn import(config: &Config, input: &Path) -> CliResult<ImportSummary> {
    if config.data_file.is_none() {
        return Err(CliError::config_error(
            "import requires a data_file to persist into",
        ));
    }

    let content = fs::read_to_string(input)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", input.display(), e)))?;
    let records: Vec<Record> = serde_json::from_str(&content)?;

    let engine = MutationEngine::new(config.open_store()?);
    let mut summary = ImportSummary::default();
    for record in records {
        match engine.add(&Scope::Global, record) {
            Ok(_) => summary.imported += 1,
            Err(RecordError::Conflict(id)) => {
                tracing::warn!(event = "RECORD_IMPORT_SKIPPED", id = %id);
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        event = "RECORDS_IMPORTED",
        imported = summary.imported,
        skipped = summary.skipped
    );
    Ok(summary)
}

//! CLI module for recordtrail
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP record API
//! - export: Administrative dump of every record
//! - import: Bulk add from a JSON file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{export, import, run, run_command, serve, ImportSummary};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

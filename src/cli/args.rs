//! CLI argument definitions using clap
//!
//! Commands:
//! - recordtrail serve [--config <path>] [--port <port>]
//! - recordtrail export [--config <path>]
//! - recordtrail import [--config <path>] --input <file>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// recordtrail - queryable audit-record trail
#[derive(Parser, Debug)]
#[command(name = "recordtrail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the record API over HTTP
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Dump every stored record to stdout as JSON
    Export {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Add every record of a JSON array file, skipping existing keys
    Import {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON file holding an array of records
        #[arg(long)]
        input: PathBuf,
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
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["recordtrail", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert!(config.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_import_requires_input() {
        assert!(Cli::try_parse_from(["recordtrail", "import"]).is_err());
    }
}

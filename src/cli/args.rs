//! CLI argument definitions using clap
//!
//! Commands:
//! - errdigest serve --config <path> [--port <port>]
//! - errdigest render --config <path>
//! - errdigest log --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// errdigest - Daily digest RSS feed of an application error log
#[derive(Parser, Debug)]
#[command(name = "errdigest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the digest feed over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./errdigest.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Render the digest feed once and write it to stdout
    Render {
        /// Path to configuration file
        #[arg(long, default_value = "./errdigest.json")]
        config: PathBuf,
    },

    /// Append one JSON error record from stdin to the error log
    Log {
        /// Path to configuration file
        #[arg(long, default_value = "./errdigest.json")]
        config: PathBuf,
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
        let cli = Cli::try_parse_from(["errdigest", "serve", "--config", "c.json", "--port", "9000"])
            .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("c.json"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["errdigest", "render"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Render { config } if config == PathBuf::from("./errdigest.json")
        ));
    }
}

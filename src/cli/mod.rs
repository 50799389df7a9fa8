//! CLI module for errdigest
//!
//! Provides command-line interface for:
//! - serve: Run the digest feed HTTP server
//! - render: Write the digest feed to stdout
//! - log: Append one error record read from stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{log, render, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};

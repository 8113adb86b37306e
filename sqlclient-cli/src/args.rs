//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use sqlclient_core::{Config, DEFAULT_TIMEOUT_SECS};

use crate::credentials;
use crate::error::CliError;

/// Longest timeout the drivers can honor (SQLite counts milliseconds in an `int`)
const MAX_TIMEOUT_SECS: u64 = i32::MAX as u64 / 1000;

/// Line-oriented SQL console
#[derive(Parser, Debug)]
#[command(
    name = "sqlclient",
    version,
    about = "Line-oriented SQL console",
    long_about = "Reads one SQL statement per line from standard input, executes it and prints\n\
                  the result. Row values are printed as SQL literals on standard output; labels,\n\
                  prompts and summaries can be silenced for scripting."
)]
pub struct Args {
    /// Database driver (sqlite)
    pub driver: String,

    /// Connection target understood by the driver
    pub url: String,

    /// Print data only: no prompt, labels or summaries
    #[arg(short = 's', long, env = "SQLCLIENT_SILENT")]
    pub silent: bool,

    /// Keep reconnecting and keep reading after errors
    #[arg(short = 'r', long, env = "SQLCLIENT_RETRY")]
    pub retry: bool,

    /// Do not print the "> " prompt
    #[arg(long)]
    pub no_prompt: bool,

    /// Connection timeout
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: u64,

    /// File with the username on the first line and the password on the second
    #[arg(short = 'p', long, value_name = "FILE")]
    pub password_file: Option<PathBuf>,

    /// Never use the line editor, even on a terminal
    #[arg(long)]
    pub plain: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Settings for the run, loading credentials when a file was given
    pub fn config(&self) -> Result<Config, CliError> {
        let credentials = self
            .password_file
            .as_deref()
            .map(credentials::load)
            .transpose()?;

        Ok(Config::new()
            .quiet(self.silent)
            .prompt(!self.no_prompt)
            .retry(self.retry)
            .timeout_secs(self.timeout)
            .credentials(credentials))
    }

    /// Whether input may go through the line editor
    pub fn interactive(&self) -> bool {
        !self.no_prompt && !self.plain
    }
}

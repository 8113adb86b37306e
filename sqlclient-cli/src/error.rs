//! CLI-specific error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing a console session
#[derive(Debug, Error)]
pub enum CliError {
    /// The credentials file could not be read
    #[error("Cannot read credentials file {}: {source}", .path.display())]
    CredentialsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file has no username line
    #[error("Invalid credentials file {}: no username", .0.display())]
    InvalidCredentials(PathBuf),

    /// Readline/input error
    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

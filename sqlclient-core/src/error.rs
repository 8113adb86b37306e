//! Error types for the console core
//!
//! Errors are grouped by how the supervisor has to treat them:
//!
//! - [`Error::Io`] - a console channel failed; retryable
//! - [`Error::Database`] - connecting, executing or fetching failed; retryable
//! - [`Error::Config`] - the run cannot start as configured; never retried
//!
//! Failures while releasing resources are not represented here. They are
//! reported through [`inhibit`] and swallowed.

use std::fmt;

use thiserror::Error;

/// Error reported by a database driver
///
/// Carries a human readable message and, when the driver has one, the
/// underlying error as its source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DatabaseError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DatabaseError {
    /// Create an error from a message alone
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping the driver's own error
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The message without the source chain
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Top-level error type for console operations
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection, execution or row iteration failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// The run is misconfigured (unknown driver, bad options)
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Database,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Io => "I/O error",
            ErrorKind::Database => "database error",
            ErrorKind::Config => "configuration error",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Database(_) => ErrorKind::Database,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns true if this is a channel error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns true if this is a database error
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Returns true if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if a retry policy may rerun the failed operation
    ///
    /// Channel and database failures can be transient. A configuration error
    /// will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        self.is_io() || self.is_database()
    }
}

/// Result type for console operations
pub type Result<T> = std::result::Result<T, Error>;

/// Report an error raised while releasing a resource
///
/// Release happens on exit paths where a primary outcome (success or another
/// error) is already decided, so the failure is logged and dropped.
pub fn inhibit(what: &str, err: &dyn std::error::Error) {
    log::warn!("Inhibited error while closing {}: {}", what, err);
}

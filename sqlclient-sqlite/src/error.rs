//! SQLite driver error types

use sqlclient_core::DatabaseError;
use thiserror::Error;

/// Errors raised by the SQLite driver
#[derive(Debug, Error)]
pub enum SqliteDriverError {
    /// The connection target is empty or malformed
    #[error("Invalid target: '{0}'")]
    InvalidTarget(String),

    /// Failed to open the database
    #[error("Failed to connect to database '{target}': {source}")]
    ConnectionFailed {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Generic SQLite error wrapper
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<SqliteDriverError> for DatabaseError {
    fn from(err: SqliteDriverError) -> Self {
        DatabaseError::with_source(err.to_string(), err)
    }
}

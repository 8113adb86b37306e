//! SQLite driver and connection

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::OpenFlags;
use sqlclient_core::{ConnectOptions, Connection, DatabaseError, Driver, Statement};

use crate::error::SqliteDriverError;
use crate::statement::SqliteStatement;

/// Name the driver is registered under
pub const DRIVER_NAME: &str = "sqlite";

/// Longest busy timeout SQLite accepts (milliseconds in an `int`)
const MAX_BUSY_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// Where a connection target points
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Memory,
    Path(PathBuf),
    /// `file:` URI, opened with URI filename interpretation
    Uri(String),
}

impl Target {
    /// Parse a path, `:memory:` or `file:` URI, optionally behind a `sqlite:`
    /// or `sqlite://` prefix
    pub(crate) fn parse(target: &str) -> Result<Self, SqliteDriverError> {
        let rest = target
            .strip_prefix("sqlite://")
            .or_else(|| target.strip_prefix("sqlite:"))
            .unwrap_or(target);

        if rest.trim().is_empty() {
            return Err(SqliteDriverError::InvalidTarget(target.to_string()));
        }
        if rest == ":memory:" {
            Ok(Self::Memory)
        } else if rest.starts_with("file:") {
            Ok(Self::Uri(rest.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(rest)))
        }
    }
}

/// Driver for SQLite databases through rusqlite
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl SqliteDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for SqliteDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Connection>, DatabaseError> {
        let connection = SqliteConnection::open(options)?;
        Ok(Box::new(connection))
    }
}

/// An open SQLite database
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open the database named by `options.target`
    ///
    /// The timeout becomes SQLite's busy timeout, capped at what SQLite can
    /// represent. SQLite has no notion of a login, so credentials are ignored.
    pub fn open(options: &ConnectOptions) -> Result<Self, SqliteDriverError> {
        if options.credentials.is_some() {
            log::warn!(
                "SQLite does not authenticate; ignoring credentials for {}",
                options.target
            );
        }

        let opened = match Target::parse(&options.target)? {
            Target::Memory => rusqlite::Connection::open_in_memory(),
            Target::Path(path) => rusqlite::Connection::open(path),
            Target::Uri(uri) => rusqlite::Connection::open_with_flags(
                uri,
                OpenFlags::default() | OpenFlags::SQLITE_OPEN_URI,
            ),
        };
        let conn = opened.map_err(|source| SqliteDriverError::ConnectionFailed {
            target: options.target.clone(),
            source,
        })?;

        if options.timeout > MAX_BUSY_TIMEOUT {
            log::warn!(
                "Timeout of {}s exceeds SQLite's limit; using {}s",
                options.timeout.as_secs(),
                MAX_BUSY_TIMEOUT.as_secs()
            );
        }
        conn.busy_timeout(options.timeout.min(MAX_BUSY_TIMEOUT))?;
        // Enable foreign keys by default
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        log::debug!("Opened SQLite database {}", options.target);
        Ok(Self { conn })
    }
}

impl Connection for SqliteConnection {
    fn execute(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>, DatabaseError> {
        let statement = SqliteStatement::execute(&self.conn, sql)?;
        Ok(Box::new(statement))
    }

    fn close(self: Box<Self>) -> Result<(), DatabaseError> {
        self.conn
            .close()
            .map_err(|(_, e)| SqliteDriverError::from(e).into())
    }
}

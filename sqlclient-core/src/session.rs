//! Driver abstraction
//!
//! A [`Driver`] opens a [`Connection`]; a connection executes one statement
//! at a time and hands back a [`Statement`] that owns whatever driver-side
//! resources the execution produced until it is released.

use std::time::Duration;

use crate::config::Credentials;
use crate::error::DatabaseError;
use crate::value::ColumnValue;

/// Everything a driver needs to establish a connection
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Driver-specific connection target (URL, path, DSN)
    pub target: String,
    pub credentials: Option<Credentials>,
    /// Upper bound on establishing the connection or waiting for locks
    pub timeout: Duration,
}

impl ConnectOptions {
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            credentials: None,
            timeout,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }
}

/// A pluggable database driver
pub trait Driver {
    /// Name the driver is registered under
    fn name(&self) -> &str;

    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Connection>, DatabaseError>;
}

/// An open connection to a database
pub trait Connection {
    /// Submit `sql` verbatim for execution
    fn execute(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>, DatabaseError>;

    /// Close the connection, releasing it on the driver side
    fn close(self: Box<Self>) -> Result<(), DatabaseError>;
}

/// An executed statement
///
/// Either row-returning, in which case the labels and rows are available, or
/// not, in which case only the affected row count is meaningful.
pub trait Statement {
    fn is_row_returning(&self) -> bool;

    /// Number of rows affected by a non row-returning statement
    fn update_count(&self) -> u64;

    /// Column labels, one per position; may repeat
    fn column_labels(&self) -> &[String];

    /// Advance the cursor, forward only
    fn next_row(&mut self) -> Result<Option<Vec<ColumnValue>>, DatabaseError>;

    /// Release the cursor and the statement handle
    ///
    /// Called exactly once per executed statement.
    fn release(&mut self) -> Result<(), DatabaseError>;
}

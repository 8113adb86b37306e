//! Test utilities for sqlclient-core.
//!
//! Scripted driver, connection and statement implementations for exercising
//! the REPL and supervisor without a database.
//!
//! Enable with the `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! sqlclient-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sqlclient_core::test_utils::{MockConnection, MockStatement};
//! use sqlclient_core::ColumnValue;
//!
//! let conn = MockConnection::new()
//!     .with_statement(MockStatement::rows(["X"], vec![vec![ColumnValue::Int(1)]]))
//!     .with_error("no such table: t")
//!     .with_statement(MockStatement::update(3));
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::DatabaseError;
use crate::session::{ConnectOptions, Connection, Driver, Statement};
use crate::value::ColumnValue;

/// Shared call counter, readable after the counted object is gone
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn increment(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A statement with scripted labels and rows, or a scripted update count.
pub struct MockStatement {
    labels: Vec<String>,
    rows: VecDeque<Vec<ColumnValue>>,
    row_returning: bool,
    update_count: u64,
    fail_after: Option<usize>,
    fail_release: bool,
    fetched: usize,
    releases: CallCounter,
}

impl MockStatement {
    /// A row-returning statement
    pub fn rows<I, S>(labels: I, rows: Vec<Vec<ColumnValue>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            rows: rows.into(),
            row_returning: true,
            update_count: 0,
            fail_after: None,
            fail_release: false,
            fetched: 0,
            releases: CallCounter::default(),
        }
    }

    /// A statement that affected `count` rows
    pub fn update(count: u64) -> Self {
        Self {
            row_returning: false,
            update_count: count,
            ..Self::rows(Vec::<String>::new(), Vec::new())
        }
    }

    /// Fail the fetch after `rows` rows were returned
    pub fn fail_after(mut self, rows: usize) -> Self {
        self.fail_after = Some(rows);
        self
    }

    /// Fail when released (the release is still counted)
    pub fn fail_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    /// Counter of `release` calls, shared with the statement
    pub fn release_counter(&self) -> CallCounter {
        self.releases.clone()
    }
}

impl Statement for MockStatement {
    fn is_row_returning(&self) -> bool {
        self.row_returning
    }

    fn update_count(&self) -> u64 {
        self.update_count
    }

    fn column_labels(&self) -> &[String] {
        &self.labels
    }

    fn next_row(&mut self) -> Result<Option<Vec<ColumnValue>>, DatabaseError> {
        if self.fail_after == Some(self.fetched) {
            return Err(DatabaseError::new("fetch failed"));
        }
        let row = self.rows.pop_front();
        if row.is_some() {
            self.fetched += 1;
        }
        Ok(row)
    }

    fn release(&mut self) -> Result<(), DatabaseError> {
        self.releases.increment();
        if self.fail_release {
            return Err(DatabaseError::new("release failed"));
        }
        Ok(())
    }
}

/// A connection answering `execute` calls from a script, in order.
///
/// Clones share the script and the recorded statements, so a test can keep a
/// handle after the connection was boxed by [`MockDriver`].
#[derive(Clone, Default)]
pub struct MockConnection {
    script: Arc<Mutex<VecDeque<Result<MockStatement, String>>>>,
    executed: Arc<Mutex<Vec<String>>>,
    closes: CallCounter,
    fail_close: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a statement as the outcome of the next `execute`
    pub fn with_statement(self, statement: MockStatement) -> Self {
        self.push(Ok(statement));
        self
    }

    /// Queue an execution error
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// Fail when closed (the close is still counted)
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Every SQL text submitted so far, failed ones included
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn close_counter(&self) -> CallCounter {
        self.closes.clone()
    }

    fn push(&self, outcome: Result<MockStatement, String>) {
        self.script.lock().unwrap().push_back(outcome);
    }
}

impl Connection for MockConnection {
    fn execute(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>, DatabaseError> {
        self.executed.lock().unwrap().push(sql.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(statement)) => Ok(Box::new(statement)),
            Some(Err(message)) => Err(DatabaseError::new(message)),
            None => Err(DatabaseError::new(format!("no scripted outcome for: {}", sql))),
        }
    }

    fn close(self: Box<Self>) -> Result<(), DatabaseError> {
        self.closes.increment();
        if self.fail_close {
            return Err(DatabaseError::new("close failed"));
        }
        Ok(())
    }
}

/// A driver handing out scripted connections or connect errors, in order.
#[derive(Clone, Default)]
pub struct MockDriver {
    script: Arc<Mutex<VecDeque<Result<MockConnection, String>>>>,
    attempts: Arc<Mutex<Vec<ConnectOptions>>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection(self, connection: MockConnection) -> Self {
        self.script.lock().unwrap().push_back(Ok(connection));
        self
    }

    pub fn with_connect_error(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Options of every connect attempt so far
    pub fn attempts(&self) -> Vec<ConnectOptions> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Driver for MockDriver {
    fn name(&self) -> &str {
        "mock"
    }

    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Connection>, DatabaseError> {
        self.attempts.lock().unwrap().push(options.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(connection)) => Ok(Box::new(connection)),
            Some(Err(message)) => Err(DatabaseError::new(message)),
            None => Err(DatabaseError::new("no scripted connection")),
        }
    }
}

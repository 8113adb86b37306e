//! Line-oriented SQL console core
//!
//! This crate provides:
//! - Driver, connection and statement traits for pluggable database backends
//! - A console with separate data and human channels, and an optional prompt
//! - A read-eval-print loop that renders every column as a SQL literal
//! - A supervisor that connects and runs the loop under retry policies
//!
//! Backends live in their own crates; see `sqlclient-sqlite`.

pub mod config;
pub mod console;
mod error;
pub mod literal;
pub mod repl;
pub mod result;
pub mod retry;
pub mod session;
pub mod supervisor;
mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, Credentials, CONNECT_RETRY_DELAY, DEFAULT_TIMEOUT_SECS};
pub use console::{BufReadSource, ConsoleReader, ConsoleWriter, LineSource, PROMPT};
pub use error::{inhibit, DatabaseError, Error, ErrorKind, Result};
pub use repl::Repl;
pub use result::{RowSet, StatementResult, UpdateCount, COLUMN_SEPARATOR};
pub use retry::{retry_with_policy, RetryCallback, RetryInfo, RetryPolicy};
pub use session::{ConnectOptions, Connection, Driver, Statement};
pub use supervisor::Supervisor;
pub use value::{ColumnValue, Decimal, ParseDecimalError};

//! SQLite driver for sqlclient
//!
//! Opens SQLite databases through rusqlite (with SQLite bundled) and maps
//! their values onto [`sqlclient_core::ColumnValue`].
//!
//! Accepted targets: a file path, `:memory:`, or a `file:` URI, each
//! optionally prefixed with `sqlite:` or `sqlite://`.
//!
//! ```
//! use std::time::Duration;
//! use sqlclient_core::{ConnectOptions, Driver};
//! use sqlclient_sqlite::SqliteDriver;
//!
//! let options = ConnectOptions::new(":memory:", Duration::from_secs(10));
//! let conn = SqliteDriver::new().connect(&options)?;
//! conn.close()?;
//! # Ok::<(), sqlclient_core::DatabaseError>(())
//! ```

mod connection;
mod error;
mod statement;
mod value;

pub use connection::{SqliteConnection, SqliteDriver, DRIVER_NAME};
pub use error::SqliteDriverError;
pub use statement::SqliteStatement;

//! Executed SQLite statements
//!
//! rusqlite's row cursor borrows its statement, so the rows of a query are
//! stepped into memory when the statement executes and handed out from there.
//! The prepared statement itself is kept until release, which finalizes it.

use std::collections::VecDeque;

use sqlclient_core::{ColumnValue, DatabaseError, Statement};

use crate::error::SqliteDriverError;
use crate::value::{to_column_value, Declared};

pub struct SqliteStatement<'c> {
    statement: Option<rusqlite::Statement<'c>>,
    labels: Vec<String>,
    rows: VecDeque<Vec<ColumnValue>>,
    row_returning: bool,
    update_count: u64,
}

impl<'c> SqliteStatement<'c> {
    /// Prepare `sql` verbatim and run it to completion
    pub(crate) fn execute(
        conn: &'c rusqlite::Connection,
        sql: &str,
    ) -> Result<Self, SqliteDriverError> {
        let mut statement = conn.prepare(sql)?;

        // Comments and bare semicolons compile to no statement at all
        if statement.expanded_sql().is_none() {
            log::debug!("Nothing to execute in {:?}", sql);
            return Ok(Self::update_count(statement, 0));
        }

        if statement.column_count() == 0 {
            // changes() still holds the last DML count after DDL
            let before = conn.total_changes();
            statement.execute([])?;
            let changed = if conn.total_changes() == before {
                0
            } else {
                conn.changes()
            };
            return Ok(Self::update_count(statement, changed));
        }

        let labels = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let declared: Vec<Declared> = statement
            .columns()
            .iter()
            .map(|column| Declared::from_decl(column.decl_type()))
            .collect();
        let rows = fetch_all(&mut statement, &declared)?;

        Ok(Self {
            statement: Some(statement),
            labels,
            rows,
            row_returning: true,
            update_count: 0,
        })
    }

    fn update_count(statement: rusqlite::Statement<'c>, update_count: u64) -> Self {
        Self {
            statement: Some(statement),
            labels: Vec::new(),
            rows: VecDeque::new(),
            row_returning: false,
            update_count,
        }
    }
}

fn fetch_all(
    statement: &mut rusqlite::Statement<'_>,
    declared: &[Declared],
) -> Result<VecDeque<Vec<ColumnValue>>, rusqlite::Error> {
    let mut rows = statement.query([])?;
    let mut buffered = VecDeque::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(declared.len());
        for (i, declared) in declared.iter().enumerate() {
            values.push(to_column_value(row.get_ref(i)?, *declared));
        }
        buffered.push_back(values);
    }
    Ok(buffered)
}

impl Statement for SqliteStatement<'_> {
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
        Ok(self.rows.pop_front())
    }

    fn release(&mut self) -> Result<(), DatabaseError> {
        self.rows.clear();
        match self.statement.take() {
            Some(statement) => statement
                .finalize()
                .map_err(|e| SqliteDriverError::from(e).into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, active BOOLEAN);
             INSERT INTO users VALUES (1, 'Alice', 1);
             INSERT INTO users VALUES (2, 'Bob', 0);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_query_is_row_returning() {
        let conn = conn();
        let mut stmt =
            SqliteStatement::execute(&conn, "SELECT id, name, active FROM users ORDER BY id")
                .unwrap();

        assert!(stmt.is_row_returning());
        assert_eq!(stmt.column_labels(), &["id", "name", "active"]);
        assert_eq!(
            stmt.next_row().unwrap(),
            Some(vec![
                ColumnValue::Int(1),
                ColumnValue::Text("Alice".into()),
                ColumnValue::Boolean(true)
            ])
        );
        assert!(stmt.next_row().unwrap().is_some());
        assert_eq!(stmt.next_row().unwrap(), None);
        stmt.release().unwrap();
    }

    #[test]
    fn test_update_reports_changed_rows() {
        let conn = conn();
        let mut stmt = SqliteStatement::execute(&conn, "UPDATE users SET active = 1").unwrap();

        assert!(!stmt.is_row_returning());
        assert_eq!(stmt.update_count(), 2);
        assert!(stmt.column_labels().is_empty());
        assert_eq!(stmt.next_row().unwrap(), None);
        stmt.release().unwrap();
    }

    #[test]
    fn test_ddl_after_dml_counts_zero() {
        let conn = conn();
        let mut update = SqliteStatement::execute(&conn, "DELETE FROM users").unwrap();
        assert_eq!(update.update_count(), 2);
        update.release().unwrap();

        let mut ddl = SqliteStatement::execute(&conn, "CREATE TABLE notes (body TEXT)").unwrap();
        assert_eq!(ddl.update_count(), 0);
        ddl.release().unwrap();

        let mut noop = SqliteStatement::execute(&conn, "UPDATE users SET active = 0").unwrap();
        assert_eq!(noop.update_count(), 0);
        noop.release().unwrap();
    }

    #[test]
    fn test_comment_only_sql_is_empty_update() {
        let conn = conn();
        for sql in ["-- just a note", ";", "/* block */ ;"] {
            let mut stmt = SqliteStatement::execute(&conn, sql).unwrap();
            assert!(!stmt.is_row_returning());
            assert_eq!(stmt.update_count(), 0);
            assert_eq!(stmt.next_row().unwrap(), None);
            stmt.release().unwrap();
        }
    }

    #[test]
    fn test_empty_result_still_has_labels() {
        let conn = conn();
        let mut stmt =
            SqliteStatement::execute(&conn, "SELECT name FROM users WHERE id > 10").unwrap();

        assert!(stmt.is_row_returning());
        assert_eq!(stmt.column_labels(), &["name"]);
        assert_eq!(stmt.next_row().unwrap(), None);
    }

    #[test]
    fn test_invalid_sql_is_an_error() {
        let conn = conn();
        let err = SqliteStatement::execute(&conn, "SELEC 1").err().unwrap();
        assert!(matches!(err, SqliteDriverError::Sqlite(_)));
    }

    #[test]
    fn test_release_twice_is_harmless() {
        let conn = conn();
        let mut stmt = SqliteStatement::execute(&conn, "SELECT 1").unwrap();
        stmt.release().unwrap();
        stmt.release().unwrap();
    }
}

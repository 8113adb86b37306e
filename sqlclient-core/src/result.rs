//! Statement result classification and rendering
//!
//! Output format:
//!
//! ```text
//! ID,	NAME                  <- labels, human channel
//! 1,	'Alice'               <- one line per row, data channel
//! Records selected: 1       <- human channel
//!
//! Records updated: 3        <- label on the human channel, count on data
//! ```

use std::io::Write;

use crate::console::ConsoleWriter;
use crate::error::{inhibit, DatabaseError, Result};
use crate::literal;
use crate::session::{Connection, Statement};

/// Separator between columns, both in the header and in rows
pub const COLUMN_SEPARATOR: &str = ",\t";

/// Releases the statement when dropped, on every exit path
struct StatementGuard<'s> {
    statement: Box<dyn Statement + 's>,
}

impl Drop for StatementGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.statement.release() {
            inhibit("statement", &err);
        }
    }
}

/// Rows produced by a query
pub struct RowSet<'s> {
    labels: Vec<String>,
    guard: StatementGuard<'s>,
}

impl RowSet<'_> {
    pub fn column_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    fn render<W: Write>(&mut self, out: &mut ConsoleWriter<W>) -> Result<()> {
        let column_count = self.column_count();
        if column_count == 0 {
            out.write_for_human("No data")?;
            out.new_line_for_human()?;
            return Ok(());
        }

        out.write_for_human(&self.labels.join(COLUMN_SEPARATOR))?;
        out.new_line_for_human()?;

        let mut count: u64 = 0;
        while let Some(row) = self.guard.statement.next_row()? {
            if row.len() != column_count {
                return Err(DatabaseError::new(format!(
                    "row has {} values but the result has {} columns",
                    row.len(),
                    column_count
                ))
                .into());
            }
            count += 1;
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    out.write_data(COLUMN_SEPARATOR)?;
                }
                out.write_data(&literal::encode(value))?;
            }
            out.new_line_for_data()?;
        }

        out.write_for_human(&format!("Records selected: {}", count))?;
        out.new_line_for_human()?;
        Ok(())
    }
}

/// Affected row count of a statement that returned no rows
pub struct UpdateCount<'s> {
    count: u64,
    _guard: StatementGuard<'s>,
}

impl UpdateCount<'_> {
    pub fn count(&self) -> u64 {
        self.count
    }

    fn render<W: Write>(&self, out: &mut ConsoleWriter<W>) -> Result<()> {
        out.write_for_human("Records updated: ")?;
        out.write_data(&self.count.to_string())?;
        out.new_line_for_data()?;
        Ok(())
    }
}

/// Outcome of one executed statement
///
/// Owns the driver-side statement; dropping the result releases it.
pub enum StatementResult<'s> {
    RowSet(RowSet<'s>),
    UpdateCount(UpdateCount<'s>),
}

impl<'s> StatementResult<'s> {
    /// Execute `sql` verbatim and classify the outcome
    pub fn execute<C: Connection + ?Sized>(
        connection: &'s mut C,
        sql: &str,
    ) -> std::result::Result<Self, DatabaseError> {
        log::debug!("Executing: {}", sql);
        let statement = connection.execute(sql)?;
        Ok(Self::classify(statement))
    }

    /// Decide between row set and update count
    pub fn classify(statement: Box<dyn Statement + 's>) -> Self {
        if statement.is_row_returning() {
            let labels = statement.column_labels().to_vec();
            Self::RowSet(RowSet {
                labels,
                guard: StatementGuard { statement },
            })
        } else {
            let count = statement.update_count();
            Self::UpdateCount(UpdateCount {
                count,
                _guard: StatementGuard { statement },
            })
        }
    }

    pub fn is_row_set(&self) -> bool {
        matches!(self, Self::RowSet(_))
    }

    /// Write the result to the console
    pub fn render<W: Write>(&mut self, out: &mut ConsoleWriter<W>) -> Result<()> {
        match self {
            Self::RowSet(rows) => rows.render(out),
            Self::UpdateCount(update) => update.render(out),
        }
    }

    /// Release the driver-side resources now
    pub fn release(self) {
        drop(self);
    }
}

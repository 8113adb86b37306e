//! The read-eval-print loop
//!
//! One statement per input line. Each line goes through
//! read → execute → render → release before the next one is read; blank lines
//! are skipped and end of input stops the loop.

use std::io::{self, Write};

use crate::console::{ConsoleReader, ConsoleWriter, LineSource};
use crate::error::Result;
use crate::result::StatementResult;
use crate::session::Connection;

/// Statement loop over a console
///
/// The loop owns its channels, so a supervisor can call [`Repl::run`] again
/// after a failure and continue with the next unread line.
pub struct Repl<S, W: Write> {
    reader: ConsoleReader<S>,
    writer: ConsoleWriter<W>,
}

impl<S: LineSource, W: Write> Repl<S, W> {
    pub fn new(reader: ConsoleReader<S>, writer: ConsoleWriter<W>) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut ConsoleWriter<W> {
        &mut self.writer
    }

    pub fn into_writer(self) -> ConsoleWriter<W> {
        self.writer
    }

    /// Run until end of input
    ///
    /// Returns the first execution, rendering or channel error. The failed
    /// statement's resources are released before the error is returned.
    pub fn run(&mut self, connection: &mut dyn Connection) -> Result<()> {
        while let Some(line) = self.read_statement()? {
            let mut result = StatementResult::execute(&mut *connection, &line)?;
            let rendered = result
                .render(&mut self.writer)
                .and_then(|()| Ok(self.writer.flush_for_human()?));
            result.release();
            rendered?;
        }
        log::debug!("End of input");
        Ok(())
    }

    /// Next non-blank line, verbatim
    fn read_statement(&mut self) -> io::Result<Option<String>> {
        loop {
            match self.reader.read_line(&mut self.writer)? {
                Some(line) if line.trim().is_empty() => continue,
                line => return Ok(line),
            }
        }
    }
}

//! Dual-channel console output

use std::io::{self, Write};

const NEWLINE: &[u8] = b"\n";

/// Writer separating human-facing output from result data
///
/// Data operations always reach the underlying writer. Human operations
/// (prompt, labels, summaries) become no-ops when the writer is quiet, so
/// callers state intent instead of checking the quiet flag themselves.
///
/// Nothing is flushed implicitly: callers flush after each logical unit.
pub struct ConsoleWriter<W: Write> {
    inner: W,
    quiet: bool,
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(inner: W, quiet: bool) -> Self {
        Self { inner, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn write_data(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())
    }

    pub fn flush_data(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn new_line_for_data(&mut self) -> io::Result<()> {
        self.inner.write_all(NEWLINE)
    }

    pub fn write_for_human(&mut self, s: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_data(s)
    }

    pub fn flush_for_human(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.flush_data()
    }

    pub fn new_line_for_human(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.new_line_for_data()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

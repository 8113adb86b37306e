//! Line-oriented console input

use std::io::{self, BufRead, Write};

use super::writer::ConsoleWriter;

/// Prompt shown before each read when prompting is enabled
pub const PROMPT: &str = "> ";

/// A source of input lines
pub trait LineSource {
    /// Read the next line without its terminator, `None` at end of input
    ///
    /// `prompt` is only non-empty for sources that draw their own prompt
    /// (see [`LineSource::draws_prompt`]).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Line editors own the terminal and render the prompt themselves
    fn draws_prompt(&self) -> bool {
        false
    }
}

/// [`LineSource`] over any buffered reader
pub struct BufReadSource<R> {
    reader: R,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Reads one line per call, prompting on the human channel first
pub struct ConsoleReader<S> {
    source: S,
    prompt_enabled: bool,
}

impl<S: LineSource> ConsoleReader<S> {
    pub fn new(source: S, prompt_enabled: bool) -> Self {
        Self {
            source,
            prompt_enabled,
        }
    }

    /// Read the next line, `None` at end of input
    ///
    /// The prompt is flushed before blocking so it is visible even when the
    /// output is a pipe.
    pub fn read_line<W: Write>(&mut self, out: &mut ConsoleWriter<W>) -> io::Result<Option<String>> {
        if self.source.draws_prompt() {
            // The editor takes over the terminal; anything still buffered
            // must be on screen before it does.
            out.flush_data()?;
            let prompt = if self.prompt_enabled && !out.is_quiet() {
                PROMPT
            } else {
                ""
            };
            return self.source.read_line(prompt);
        }

        if self.prompt_enabled {
            out.write_for_human(PROMPT)?;
            out.flush_for_human()?;
        }
        self.source.read_line("")
    }
}

//! Line sources for standard input
//!
//! On an interactive terminal lines come from a rustyline editor with
//! persistent history; otherwise stdin is read as plain buffered text.

use std::io::{self, IsTerminal, StdinLock};
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sqlclient_core::{BufReadSource, LineSource};

use crate::error::CliError;

/// Where history is kept between runs
fn history_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("sqlclient/history.txt"))
        .unwrap_or_else(|| ".sqlclient/history.txt".into())
}

/// Line editor with history, saved when dropped
pub struct EditorSource {
    editor: DefaultEditor,
    history_path: PathBuf,
}

impl EditorSource {
    pub fn new() -> Result<Self, CliError> {
        let mut editor = DefaultEditor::new()?;
        let history_path = history_path();

        if history_path.exists() {
            if let Err(err) = editor.load_history(&history_path) {
                log::warn!("Could not load history from {}: {}", history_path.display(), err);
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Persist history; failures are only logged
    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                log::warn!("Could not create {}: {}", parent.display(), err);
                return;
            }
        }
        if let Err(err) = self.editor.save_history(&self.history_path) {
            log::warn!(
                "Could not save history to {}: {}",
                self.history_path.display(),
                err
            );
        }
    }
}

impl Drop for EditorSource {
    fn drop(&mut self) {
        self.save_history();
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor
                        .add_history_entry(line.as_str())
                        .map_err(readline_to_io)?;
                }
                Ok(Some(line))
            }
            // Ctrl-C abandons the current line
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_to_io(err)),
        }
    }

    fn draws_prompt(&self) -> bool {
        true
    }
}

fn readline_to_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

/// Standard input, edited or plain
pub enum StdinSource {
    Editor(EditorSource),
    Plain(BufReadSource<StdinLock<'static>>),
}

impl StdinSource {
    /// Use the editor when stdin is a terminal and `interactive` allows it
    pub fn open(interactive: bool) -> Result<Self, CliError> {
        if interactive && io::stdin().is_terminal() {
            log::debug!("Reading input through the line editor");
            Ok(Self::Editor(EditorSource::new()?))
        } else {
            Ok(Self::plain())
        }
    }

    pub fn plain() -> Self {
        Self::Plain(BufReadSource::new(io::stdin().lock()))
    }
}

impl LineSource for StdinSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self {
            Self::Editor(editor) => editor.read_line(prompt),
            Self::Plain(plain) => plain.read_line(prompt),
        }
    }

    fn draws_prompt(&self) -> bool {
        match self {
            Self::Editor(editor) => editor.draws_prompt(),
            Self::Plain(plain) => plain.draws_prompt(),
        }
    }
}

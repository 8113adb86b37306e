//! Console channels: line input and dual-mode output

mod reader;
mod writer;

pub use reader::{BufReadSource, ConsoleReader, LineSource, PROMPT};
pub use writer::ConsoleWriter;

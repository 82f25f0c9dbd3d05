//! Console adapters over buffered readers and writers.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::command::ports::{ConsoleError, ConsoleResult, InputSource, OutputSink};

/// Reads input lines from any buffered reader, usually standard input.
#[derive(Debug)]
pub struct ConsoleInput<R> {
    reader: R,
}

impl ConsoleInput<BufReader<Stdin>> {
    /// Creates an input source over standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> ConsoleInput<R> {
    /// Wraps `reader`.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for ConsoleInput<R> {
    /// Reads one line. Bytes that are not valid UTF-8 are replaced with
    /// U+FFFD so a garbled line becomes an ordinary bad command.
    fn read_line(&mut self) -> ConsoleResult<Option<String>> {
        let mut bytes = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut bytes)
            .map_err(|err| ConsoleError::Input(err.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

/// Writes messages to any writer, usually standard output.
#[derive(Debug)]
pub struct ConsoleOutput<W> {
    writer: W,
}

impl ConsoleOutput<Stdout> {
    /// Creates an output sink over standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputSink for ConsoleOutput<W> {
    fn print_message(&mut self, message: &str) -> ConsoleResult<()> {
        writeln!(self.writer, "{message}")
            .and_then(|()| self.writer.flush())
            .map_err(|err| ConsoleError::Output(err.to_string()))
    }
}

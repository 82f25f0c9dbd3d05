//! In-memory console adapters for scripted sessions.

use std::collections::VecDeque;

use crate::command::ports::{ConsoleResult, InputSource, OutputSink};

/// Input source that replays a fixed list of lines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates a source that yields `lines` in order, then ends.
    #[must_use]
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns how many lines are still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> ConsoleResult<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Output sink that keeps every printed message.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    messages: Vec<String>,
}

impl RecordingOutput {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages printed so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns the most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl OutputSink for RecordingOutput {
    fn print_message(&mut self, message: &str) -> ConsoleResult<()> {
        self.messages.push(message.to_owned());
        Ok(())
    }
}

//! Console collaborator contracts used by the dispatcher.

pub mod console;

pub use console::{ConsoleError, ConsoleResult, InputSource, OutputSink};

//! Console adapter implementations.

pub mod memory;
pub mod stdio;

pub use memory::{RecordingOutput, ScriptedInput};
pub use stdio::{ConsoleInput, ConsoleOutput};

//! Command and undo model plus the interactive dispatcher.
//!
//! The module follows the same hexagonal split as [`crate::task`]:
//!
//! - **Domain**: [`domain::Command`], [`domain::UndoAction`], and the
//!   line grammar in [`domain::parse_input`]
//! - **Ports**: the [`ports::InputSource`] and [`ports::OutputSink`]
//!   console contracts
//! - **Adapters**: standard stream and in-memory console implementations
//! - **Services**: [`services::CommandDispatcher`], which drives
//!   execution and the undo history

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

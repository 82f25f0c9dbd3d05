//! Taskdeck: a conversational personal task tracker.
//!
//! Users type short commands such as `deadline submit report 2/12/2024 1800`
//! and the crate keeps an ordered, persisted task list, answering each
//! command with a confirmation. Every mutating command can be undone.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and console I/O
//! - **Adapters**: Concrete implementations of ports (JSON files, memory,
//!   standard streams)
//!
//! # Modules
//!
//! - [`datetime`]: Date/time token parsing and extraction from free text
//! - [`task`]: Task entities, storage ports, and the ordered repository
//! - [`command`]: Commands, undo actions, and the dispatcher loop
//! - [`config`]: Layered application configuration
//! - [`telemetry`]: Tracing subscriber bootstrap

pub mod command;
pub mod config;
pub mod datetime;
pub mod task;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

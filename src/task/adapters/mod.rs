//! Storage adapters for the task module.
//!
//! - [`memory::InMemoryTaskStorage`]: shared in-process snapshot for tests
//!   and ephemeral sessions
//! - [`json::JsonFileTaskStorage`]: JSON document on disk

pub mod json;
pub mod memory;

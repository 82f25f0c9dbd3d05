//! In-memory storage adapter.

mod storage;

pub use storage::InMemoryTaskStorage;

//! JSON file storage adapter.

mod models;
mod storage;

pub use models::{CURRENT_DOCUMENT_VERSION, TaskDocument};
pub use storage::JsonFileTaskStorage;

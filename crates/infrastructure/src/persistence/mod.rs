//! Key-value storage implementations.

mod file_storage;
mod memory_storage;

pub use file_storage::{FileKeyValueStorage, STORE_FILE_NAME, default_storage_dir};
pub use memory_storage::MemoryKeyValueStorage;

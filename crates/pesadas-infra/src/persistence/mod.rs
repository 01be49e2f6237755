//! Persistence implementations
//!
//! This module provides file-based and in-memory implementations of
//! `KeyValueStorage`.

mod file_storage;
mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

#![forbid(unsafe_code)]

pub mod records;
pub mod repository;
pub mod sqlite;

pub use records::{COURSES_KEY, Decoded, PROGRESS_KEY};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};

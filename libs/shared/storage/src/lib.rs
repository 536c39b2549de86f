pub mod keys;
pub mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{read_or, read_or_default, write};

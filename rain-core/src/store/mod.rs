pub mod backend;
pub mod result_store;

pub use backend::{KeyValueBackend, StorageError};
pub use result_store::{ResultStore, STORAGE_KEY};

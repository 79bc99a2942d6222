//! Key-value storage backends for the harvest result slot.

mod file;
mod kind;
mod memory;

pub use file::{DEFAULT_STORE_DIR, FileBackend};
pub use kind::BackendKind;
pub use memory::MemoryBackend;

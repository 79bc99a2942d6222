pub mod calculations;
pub mod contact;
pub mod format;
pub mod map;
pub mod models;
pub mod share;
pub mod store;

pub use calculations::{CalculationError, HarvestCalculator, HarvestConfig, HarvestInput};
pub use models::*;
pub use share::{ShareContacts, ShareError, ShareLinks, ShareTarget};
pub use store::{KeyValueBackend, ResultStore, StorageError};

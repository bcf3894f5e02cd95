pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use common::{Category, EntityId, Goal, User};
pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use store::{DataStore, Dataset};

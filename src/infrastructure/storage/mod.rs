//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub(crate) use postgres::decode_row;
pub use postgres::{validate_table_name, PostgresConfig, PostgresStorage};

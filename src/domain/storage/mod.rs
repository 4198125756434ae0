//! Generic storage abstraction shared by the in-memory and PostgreSQL backends

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;

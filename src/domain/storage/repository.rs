//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Keyed persistence for a single entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Every stored entity, in backend order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new entity, failing with `Conflict` if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

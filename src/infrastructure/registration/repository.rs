//! Storage-backed registration repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::registration::{
    DuplicateQuery, RegistrationId, TeamRegistration, TeamRegistrationRepository,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Registration repository over any [`Storage`] backend.
///
/// The store cannot evaluate the duplicate query itself, so `find_matching`
/// reads the whole collection once and filters in process.
#[derive(Debug)]
pub struct StorageTeamRegistrationRepository {
    storage: Arc<dyn Storage<TeamRegistration>>,
}

impl StorageTeamRegistrationRepository {
    pub fn new(storage: Arc<dyn Storage<TeamRegistration>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRegistrationRepository for StorageTeamRegistrationRepository {
    async fn find_matching(
        &self,
        query: &DuplicateQuery,
    ) -> Result<Vec<TeamRegistration>, DomainError> {
        let teams = self.storage.list().await?;
        Ok(teams.into_iter().filter(|t| query.matches(t)).collect())
    }

    async fn create(
        &self,
        registration: TeamRegistration,
    ) -> Result<TeamRegistration, DomainError> {
        self.storage.create(registration).await
    }

    async fn get(&self, id: &RegistrationId) -> Result<Option<TeamRegistration>, DomainError> {
        self.storage.get(id).await
    }

    async fn list(&self) -> Result<Vec<TeamRegistration>, DomainError> {
        self.storage.list().await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}

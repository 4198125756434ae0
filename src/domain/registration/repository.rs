//! Team registration repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::duplicate::DuplicateQuery;
use super::entity::{RegistrationId, TeamRegistration};
use crate::domain::DomainError;

/// Read and insert access to the registered teams collection
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRegistrationRepository: Send + Sync {
    /// Fetch every stored team satisfying the duplicate query in a single read
    async fn find_matching(
        &self,
        query: &DuplicateQuery,
    ) -> Result<Vec<TeamRegistration>, DomainError>;

    /// Insert a new registration
    async fn create(&self, registration: TeamRegistration)
        -> Result<TeamRegistration, DomainError>;

    async fn get(&self, id: &RegistrationId) -> Result<Option<TeamRegistration>, DomainError>;

    /// All registrations, oldest first
    async fn list(&self) -> Result<Vec<TeamRegistration>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}

//! Team registration infrastructure

mod postgres;
mod repository;
mod service;

pub use postgres::PostgresTeamRegistrationRepository;
pub use repository::StorageTeamRegistrationRepository;
pub use service::{RegisterTeamRequest, RegistrationOutcome, RegistrationService};

use std::sync::Arc;

use tracing::info;

use crate::domain::registration::{TeamRegistration, TeamRegistrationRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{StorageConfig, StorageFactory};

/// Build the registration repository for the configured backend
pub async fn create_registration_repository(
    config: &StorageConfig,
    table_name: &str,
) -> Result<Arc<dyn TeamRegistrationRepository>, DomainError> {
    match config {
        StorageConfig::InMemory => {
            info!("Using in-memory registration storage");
            let storage = StorageFactory::create::<TeamRegistration>(config, table_name).await?;
            Ok(Arc::new(StorageTeamRegistrationRepository::new(storage)))
        }
        StorageConfig::Postgres(pg_config) => {
            info!(table = %table_name, "Using PostgreSQL registration storage");
            let storage =
                StorageFactory::create_postgres::<TeamRegistration>(pg_config, table_name).await?;
            Ok(Arc::new(PostgresTeamRegistrationRepository::new(storage)))
        }
    }
}

//! Storage factory for runtime backend selection

use std::sync::Arc;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Backend selection plus its connection settings
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Builds storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Create a storage for `E`, connecting and creating the table when needed
    pub async fn create<E>(
        config: &StorageConfig,
        table_name: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            StorageConfig::Postgres(pg_config) => {
                let storage: Arc<dyn Storage<E>> =
                    Self::create_postgres::<E>(pg_config, table_name).await?;
                Ok(storage)
            }
        }
    }

    pub async fn create_postgres<E>(
        config: &PostgresConfig,
        table_name: &str,
    ) -> Result<Arc<PostgresStorage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        let pool = config.connect().await?;
        let storage = PostgresStorage::new(pool, table_name)?;
        storage.ensure_table().await?;
        Ok(Arc::new(storage))
    }
}

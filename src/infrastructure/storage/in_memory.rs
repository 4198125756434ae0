//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage
///
/// Keeps insertion order so listings match the PostgreSQL backend, which
/// orders by creation time. Data is lost when the process exits.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    inner: RwLock<Entries<E>>,
}

#[derive(Debug)]
struct Entries<E> {
    order: Vec<String>,
    by_key: HashMap<String, E>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Entries {
                order: Vec::new(),
                by_key: HashMap::new(),
            }),
        }
    }

    /// Storage pre-populated with entities, later duplicates replacing earlier ones
    pub fn with_entities(entities: Vec<E>) -> Self {
        let storage = Self::new();

        if let Ok(mut inner) = storage.inner.write() {
            for entity in entities {
                let key = entity.key().as_str().to_string();

                if inner.by_key.insert(key.clone(), entity).is_none() {
                    inner.order.push(key);
                }
            }
        }

        storage
    }
}

fn lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire storage lock: {}", e))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let inner = self.inner.read().map_err(lock_error)?;
        Ok(inner.by_key.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let inner = self.inner.read().map_err(lock_error)?;

        Ok(inner
            .order
            .iter()
            .filter_map(|key| inner.by_key.get(key).cloned())
            .collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut inner = self.inner.write().map_err(lock_error)?;

        if inner.by_key.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        inner.by_key.insert(key.clone(), entity.clone());
        inner.order.push(key);
        Ok(entity)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let inner = self.inner.read().map_err(lock_error)?;
        Ok(inner.by_key.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct Slot(String);

    impl StorageKey for Slot {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Booking {
        slot: Slot,
        holder: String,
    }

    impl StorageEntity for Booking {
        type Key = Slot;

        fn key(&self) -> &Self::Key {
            &self.slot
        }
    }

    fn booking(slot: &str, holder: &str) -> Booking {
        Booking {
            slot: Slot(slot.to_string()),
            holder: holder.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Booking> = InMemoryStorage::new();
        let b = booking("mon-9", "Asha");

        storage.create(b.clone()).await.unwrap();

        let fetched = storage.get(&Slot("mon-9".to_string())).await.unwrap();
        assert_eq!(fetched, Some(b));
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Booking> = InMemoryStorage::new();
        storage.create(booking("mon-9", "Asha")).await.unwrap();

        let result = storage.create(booking("mon-9", "Bala")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let storage: InMemoryStorage<Booking> = InMemoryStorage::new();

        for slot in ["wed-1", "mon-9", "tue-3"] {
            storage.create(booking(slot, "x")).await.unwrap();
        }

        let slots: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.slot.0)
            .collect();
        assert_eq!(slots, vec!["wed-1", "mon-9", "tue-3"]);
    }

    #[tokio::test]
    async fn test_get_and_count() {
        let storage: InMemoryStorage<Booking> = InMemoryStorage::with_entities(vec![
            booking("mon-9", "Asha"),
            booking("tue-3", "Bala"),
            booking("mon-9", "Chitra"),
        ]);

        assert_eq!(storage.count().await.unwrap(), 2);
        assert!(storage.get(&Slot("tue-3".to_string())).await.unwrap().is_some());
        assert!(storage.get(&Slot("fri-5".to_string())).await.unwrap().is_none());

        let replaced = storage.get(&Slot("mon-9".to_string())).await.unwrap().unwrap();
        assert_eq!(replaced.holder, "Chitra");
    }
}
